//! The verification tier ladder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How strongly a member's identity has been confirmed, weakest to strongest.
///
/// Tiers `None`..`Highest` (levels 0–4) form a total order and are the only
/// values ever written to durable storage. [`Tier::Skipped`] (level 5) is a
/// sentinel meaning verification is moot for the member: it satisfies any
/// requirement but is recomputed from live role state on every lookup and
/// must never be persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// No verification signal.
    None,
    /// Account email confirmed.
    Low,
    /// Account age of at least five minutes.
    Medium,
    /// [`Tier::Medium`] plus guild membership age of at least ten minutes.
    High,
    /// Phone number confirmed.
    Highest,
    /// Member bypassed verification via a pre-assigned role.
    Skipped,
}

impl Tier {
    /// Numeric level of this tier (0–5).
    pub fn level(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Highest => 4,
            Self::Skipped => 5,
        }
    }

    /// Tier for a numeric level, or `None` when out of range.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::None),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            4 => Some(Self::Highest),
            5 => Some(Self::Skipped),
            _ => None,
        }
    }

    /// Whether this tier meets a guild's required tier.
    ///
    /// `Skipped` satisfies every requirement; the others compare by level.
    pub fn satisfies(&self, required: Tier) -> bool {
        matches!(self, Self::Skipped) || *self >= required
    }

    /// Whether this tier may be written to durable storage.
    pub fn is_persistable(&self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Highest => "highest",
            Self::Skipped => "skipped",
        };
        write!(f, "{name}")
    }
}
