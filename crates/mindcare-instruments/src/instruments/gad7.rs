use mindcare_core::models::assessment::InstrumentKind;
use mindcare_core::models::risk::RiskTier;

use crate::scoring::SeverityBand;
use crate::Instrument;

/// GAD-7: Generalized Anxiety Disorder scale, seven items rated 0–3.
/// Totals range 0–21. The top band stops at `high`; GAD-7 never reports
/// a crisis tier.
pub struct Gad7;

const BANDS: [SeverityBand; 4] = [
    SeverityBand {
        max_total: 4,
        label: "Minimal Anxiety",
        tier: RiskTier::Low,
    },
    SeverityBand {
        max_total: 9,
        label: "Mild Anxiety",
        tier: RiskTier::Low,
    },
    SeverityBand {
        max_total: 14,
        label: "Moderate Anxiety",
        tier: RiskTier::Moderate,
    },
    SeverityBand {
        max_total: 21,
        label: "Severe Anxiety",
        tier: RiskTier::High,
    },
];

impl Instrument for Gad7 {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Gad7
    }

    fn name(&self) -> &str {
        "Generalized Anxiety Disorder Scale"
    }

    fn item_count(&self) -> usize {
        7
    }

    fn bands(&self) -> &[SeverityBand] {
        &BANDS
    }
}
