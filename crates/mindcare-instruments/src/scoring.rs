use serde::{Deserialize, Serialize};
use ts_rs::TS;

use mindcare_core::models::risk::RiskTier;

/// Inclusive range every item score must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemRange {
    pub min: u8,
    pub max: u8,
}

impl ItemRange {
    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }
}

/// One row of an instrument's threshold table. A total belongs to the first
/// band whose `max_total` it does not exceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SeverityBand {
    pub max_total: u32,
    pub label: &'static str,
    pub tier: RiskTier,
}

/// Outcome of scoring one questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub total: u32,
    pub severity_label: String,
    pub tier: RiskTier,
}
