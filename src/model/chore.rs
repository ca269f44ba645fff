// 🧹 Chores - the catalog records parents set up
//
// A chore is immutable once created: there is no edit or delete path, so a
// completion can always trust the price it was recorded against.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Shown when the parent leaves the emoji prompt blank
pub const DEFAULT_EMOJI: &str = "⭐";

// ============================================================================
// TIMING
// ============================================================================

/// How often a chore is expected to happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
    Daily,
    Adhoc,
    Weekly,
}

impl Timing {
    pub const ALL: [Timing; 3] = [Timing::Daily, Timing::Adhoc, Timing::Weekly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timing::Daily => "daily",
            Timing::Adhoc => "adhoc",
            Timing::Weekly => "weekly",
        }
    }

    /// Human label for menus ("Ad-hoc" rather than "adhoc")
    pub fn label(&self) -> &'static str {
        match self {
            Timing::Daily => "Daily",
            Timing::Adhoc => "Ad-hoc",
            Timing::Weekly => "Weekly",
        }
    }
}

impl std::str::FromStr for Timing {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Timing::Daily),
            "adhoc" => Ok(Timing::Adhoc),
            "weekly" => Ok(Timing::Weekly),
            other => Err(TrackerError::InvalidTiming(other.to_string())),
        }
    }
}

impl std::fmt::Display for Timing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CHORE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chore {
    /// Unique, strictly increasing, assigned by the store starting at 1
    pub id: u32,
    pub name: String,
    pub timing: Timing,
    /// Payout per completion, finite and >= 0
    pub price: f64,
    pub emoji: String,
    /// Required to qualify for allowance
    pub required: bool,
}

// ============================================================================
// TESTS
// ============================================================================
