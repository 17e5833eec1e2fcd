//! mindcare-instruments
//!
//! Screening questionnaire definitions and scoring. Pure data, no I/O.
//! Each instrument declares its item count, item range and severity bands;
//! scoring is the same sum-and-threshold rule for all of them.

pub mod error;
pub mod instruments;
pub mod scoring;

use mindcare_core::models::assessment::InstrumentKind;
use mindcare_core::models::risk::RiskTier;

use error::InstrumentError;
use scoring::{ItemRange, ScoreResult, SeverityBand};

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    fn kind(&self) -> InstrumentKind;

    /// Human-readable name (e.g., "Patient Health Questionnaire").
    fn name(&self) -> &str;

    /// Number of items the questionnaire has.
    fn item_count(&self) -> usize;

    fn item_range(&self) -> ItemRange {
        ItemRange { min: 0, max: 3 }
    }

    /// Threshold table, ordered by ascending `max_total`.
    fn bands(&self) -> &[SeverityBand];

    /// Check length and per-item range, returning the items as `u8`.
    fn validate_items(&self, items: &[i64]) -> Result<Vec<u8>, InstrumentError> {
        if items.len() != self.item_count() {
            return Err(InstrumentError::WrongItemCount {
                instrument: self.kind(),
                expected: self.item_count(),
                actual: items.len(),
            });
        }

        let range = self.item_range();
        items
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                if range.contains(value) {
                    Ok(value as u8)
                } else {
                    Err(InstrumentError::ItemOutOfRange {
                        instrument: self.kind(),
                        index,
                        value,
                        min: range.min,
                        max: range.max,
                    })
                }
            })
            .collect()
    }

    /// Sum the items and look the total up in the threshold table.
    fn score(&self, items: &[i64]) -> Result<ScoreResult, InstrumentError> {
        let items = self.validate_items(items)?;
        let total: u32 = items.iter().map(|&v| u32::from(v)).sum();

        // Valid items never exceed the last band; clamp to it regardless.
        let bands = self.bands();
        let (label, tier) = bands
            .iter()
            .find(|b| total <= b.max_total)
            .or_else(|| bands.last())
            .map(|b| (b.label, b.tier))
            .unwrap_or(("", RiskTier::Low));

        Ok(ScoreResult {
            total,
            severity_label: label.to_string(),
            tier,
        })
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
    ]
}

/// Look up an instrument by kind.
pub fn get_instrument(kind: InstrumentKind) -> Box<dyn Instrument> {
    match kind {
        InstrumentKind::Phq9 => Box::new(instruments::phq9::Phq9),
        InstrumentKind::Gad7 => Box::new(instruments::gad7::Gad7),
    }
}

/// Score a submission for the given instrument.
pub fn score(kind: InstrumentKind, items: &[i64]) -> Result<ScoreResult, InstrumentError> {
    get_instrument(kind).score(items)
}
