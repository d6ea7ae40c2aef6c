use std::fmt;

use serde::{Serialize, Serializer};

use super::tier::Tier;
use super::QueueError;
use crate::time::{self, Instant};

/// Caller-chosen request id, unique among live requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ids arrive as signed integers; negative values are rejected.
impl TryFrom<i64> for RequestId {
    type Error = QueueError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u64::try_from(id)
            .map(Self)
            .map_err(|_| QueueError::InvalidArgument(format!("id must be non-negative, got {id}")))
    }
}

/// A queued work request. Immutable once admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkRequest {
    pub id: RequestId,
    #[serde(serialize_with = "serialize_instant")]
    pub admitted_at: Instant,
    pub tier: Tier,
}

impl WorkRequest {
    pub fn new(id: RequestId, admitted_at: Instant, tier: Tier) -> Self {
        Self {
            id,
            admitted_at,
            tier,
        }
    }

    /// Position of this request in the total order.
    pub fn order_key(&self) -> OrderKey {
        OrderKey {
            tier_rank: self.tier.rank(),
            admitted_at: self.admitted_at,
            id: self.id,
        }
    }
}

/// Sort key: tier rank, then admission instant, then id.
/// Field order drives the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderKey {
    tier_rank: u8,
    admitted_at: Instant,
    id: RequestId,
}

fn serialize_instant<S: Serializer>(instant: &Instant, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&time::format_instant(instant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_instant;

    #[test]
    fn test_order_key_precedence() {
        let t0 = parse_instant("01-01-2020 00:00:00").unwrap();
        let t1 = parse_instant("01-01-2020 00:00:01").unwrap();

        let vip_late = WorkRequest::new(RequestId::new(10), t1, Tier::Vip);
        let normal_early = WorkRequest::new(RequestId::new(1), t0, Tier::Normal);
        assert!(vip_late.order_key() < normal_early.order_key());

        let a = WorkRequest::new(RequestId::new(2), t0, Tier::Normal);
        let b = WorkRequest::new(RequestId::new(1), t1, Tier::Normal);
        assert!(a.order_key() < b.order_key());

        let c = WorkRequest::new(RequestId::new(4), t0, Tier::Normal);
        assert!(a.order_key() < c.order_key());
    }

    #[test]
    fn test_id_from_signed() {
        assert_eq!(RequestId::try_from(0i64), Ok(RequestId::new(0)));
        assert_eq!(
            RequestId::try_from(i64::MAX).map(RequestId::get),
            Ok(i64::MAX as u64)
        );
        assert!(matches!(
            RequestId::try_from(-1i64),
            Err(QueueError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_serializes_wire_date() {
        let t0 = parse_instant("04-07-2017 09:30:00").unwrap();
        let r = WorkRequest::new(RequestId::new(7), t0, Tier::Normal);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["admitted_at"], "04-07-2017 09:30:00");
        assert_eq!(v["tier"], "normal");
    }
}
