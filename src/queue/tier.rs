//! Priority tiers and the id -> tier classifier.
//!
//! Served order: management-override > VIP > priority > normal.
//! Which ids land in which tier is policy data, loaded from config.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RequestId;

/// Priority tiers (lower rank = served first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    ManagementOverride = 0,
    Vip = 1,
    Priority = 2,
    Normal = 3,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::ManagementOverride,
        Tier::Vip,
        Tier::Priority,
        Tier::Normal,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManagementOverride => "management_override",
            Self::Vip => "vip",
            Self::Priority => "priority",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("rule {index} has divisible_by = 0")]
    ZeroDivisor { index: usize },
}

/// Ids divisible by `divisible_by` belong to `tier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    pub divisible_by: u64,
    pub tier: Tier,
}

/// Ordered rule list; the first matching rule wins, else `fallback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityPolicy {
    pub fallback: Tier,
    pub rules: Vec<TierRule>,
}

impl Default for PriorityPolicy {
    fn default() -> Self {
        Self {
            fallback: Tier::Normal,
            rules: vec![
                TierRule {
                    divisible_by: 15,
                    tier: Tier::ManagementOverride,
                },
                TierRule {
                    divisible_by: 5,
                    tier: Tier::Vip,
                },
                TierRule {
                    divisible_by: 3,
                    tier: Tier::Priority,
                },
            ],
        }
    }
}

impl PriorityPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        match self.rules.iter().position(|r| r.divisible_by == 0) {
            Some(index) => Err(PolicyError::ZeroDivisor { index }),
            None => Ok(()),
        }
    }
}

/// Pure id -> tier mapping over a validated policy.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    policy: PriorityPolicy,
}

impl Classifier {
    pub fn new(policy: PriorityPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn classify(&self, id: RequestId) -> Tier {
        self.policy
            .rules
            .iter()
            .find(|r| id.get() % r.divisible_by == 0)
            .map(|r| r.tier)
            .unwrap_or(self.policy.fallback)
    }
}
