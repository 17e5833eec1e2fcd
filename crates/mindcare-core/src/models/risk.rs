use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Ordinal risk category. Variant order is severity order, so `Ord`
/// compares tiers by how serious they are.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Crisis,
}

impl RiskTier {
    /// Every tier, least severe first.
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
        RiskTier::Crisis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
            RiskTier::Crisis => "crisis",
        }
    }

    /// High and crisis tiers call for a counsellor follow-up.
    pub fn is_elevated(&self) -> bool {
        *self >= RiskTier::High
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
