use mindcare_core::models::assessment::InstrumentKind;
use mindcare_core::models::risk::RiskTier;

use crate::scoring::SeverityBand;
use crate::Instrument;

/// PHQ-9: Patient Health Questionnaire, nine depression items rated 0–3.
/// Totals range 0–27.
pub struct Phq9;

const BANDS: [SeverityBand; 5] = [
    SeverityBand {
        max_total: 4,
        label: "Minimal Depression",
        tier: RiskTier::Low,
    },
    SeverityBand {
        max_total: 9,
        label: "Mild Depression",
        tier: RiskTier::Low,
    },
    SeverityBand {
        max_total: 14,
        label: "Moderate Depression",
        tier: RiskTier::Moderate,
    },
    SeverityBand {
        max_total: 19,
        label: "Moderately Severe Depression",
        tier: RiskTier::High,
    },
    SeverityBand {
        max_total: 27,
        label: "Severe Depression",
        tier: RiskTier::Crisis,
    },
];

impl Instrument for Phq9 {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Phq9
    }

    fn name(&self) -> &str {
        "Patient Health Questionnaire"
    }

    fn item_count(&self) -> usize {
        9
    }

    fn bands(&self) -> &[SeverityBand] {
        &BANDS
    }
}
