//! Priority-ordered work request queue.
//!
//! Requests are ordered by tier, then admission instant, then id.
//! Tier is derived from the id by a configurable policy.

pub mod request;
pub mod service;
pub mod store;
pub mod tier;

pub use self::request::{OrderKey, RequestId, WorkRequest};
pub use self::service::{MeanWait, SchedulingService};
pub use self::store::OrderedRequestStore;
pub use self::tier::{Classifier, PriorityPolicy, Tier, TierRule};

use thiserror::Error;

use crate::time::DateParseError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("queue already contains id {0}")]
    DuplicateId(RequestId),

    #[error("id {0} is not in the queue")]
    NotFound(RequestId),

    #[error("queue is empty")]
    EmptyStore,
}

impl QueueError {
    /// Stable machine-readable name for the error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::DuplicateId(_) => "duplicate_id",
            Self::NotFound(_) => "not_found",
            Self::EmptyStore => "empty_store",
        }
    }
}

impl From<DateParseError> for QueueError {
    fn from(e: DateParseError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}
