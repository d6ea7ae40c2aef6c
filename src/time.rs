//! Instants, durations, and the wire date format.
//!
//! Requests carry caller-supplied timestamps in the `DD-MM-YYYY hh:mm:ss`
//! format (24h clock). All wait-time math goes through this module.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use thiserror::Error;

/// A point in time as carried on the wire. The format has no zone.
pub type Instant = NaiveDateTime;

/// chrono rendering of `DD-MM-YYYY hh:mm:ss`.
pub const WIRE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("date text is empty")]
    Empty,

    #[error("'{text}' does not match DD-MM-YYYY hh:mm:ss")]
    Malformed { text: String },
}

/// Parse wire text into an [`Instant`].
pub fn parse_instant(text: &str) -> Result<Instant, DateParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }
    NaiveDateTime::parse_from_str(trimmed, WIRE_FORMAT).map_err(|_| DateParseError::Malformed {
        text: trimmed.to_string(),
    })
}

/// Render an [`Instant`] in the wire format.
pub fn format_instant(instant: &Instant) -> String {
    instant.format(WIRE_FORMAT).to_string()
}

/// Time from `admitted` to `reference`, clamped to zero when the reference
/// precedes admission.
pub fn elapsed_between(admitted: &Instant, reference: &Instant) -> Duration {
    reference
        .signed_duration_since(*admitted)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

/// Arithmetic mean of `durations`. Empty input yields `Duration::ZERO`.
pub fn mean<I>(durations: I) -> Duration
where
    I: IntoIterator<Item = Duration>,
{
    let mut total: u128 = 0;
    let mut count: u128 = 0;
    for d in durations {
        total += d.as_nanos();
        count += 1;
    }
    if count == 0 {
        return Duration::ZERO;
    }
    let nanos = total / count;
    Duration::new(
        (nanos / 1_000_000_000) as u64,
        (nanos % 1_000_000_000) as u32,
    )
}

/// Legacy rendering of a duration: the UNIX epoch advanced by `duration`,
/// printed in the wire format. Older clients expect the mean wait this way.
pub fn format_duration_compat(duration: Duration) -> String {
    let delta = TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX);
    let instant = DateTime::<Utc>::UNIX_EPOCH
        .naive_utc()
        .checked_add_signed(delta)
        .unwrap_or(NaiveDateTime::MAX);
    format_instant(&instant)
}

/// `[Nd ]HH:MM:SS`, truncated to whole seconds.
pub fn format_duration_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    if days > 0 {
        format!("{days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}
