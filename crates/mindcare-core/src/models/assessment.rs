use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::risk::RiskTier;
use crate::error::CoreError;

/// The standardized screening questionnaires the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InstrumentKind {
    #[serde(rename = "PHQ-9")]
    Phq9,
    #[serde(rename = "GAD-7")]
    Gad7,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 2] = [InstrumentKind::Phq9, InstrumentKind::Gad7];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Phq9 => "PHQ-9",
            InstrumentKind::Gad7 => "GAD-7",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstrumentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownInstrument(s.to_string()))
    }
}

/// A scored questionnaire submission. Created once per submission; immutable.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentSubmission {
    pub id: Uuid,
    pub subject_id: String,
    pub instrument: InstrumentKind,
    pub item_scores: Vec<u8>,
    pub total_score: u32,
    pub severity_label: String,
    pub tier: RiskTier,
    pub submitted_at: jiff::Timestamp,
}
