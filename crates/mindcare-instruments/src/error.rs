use thiserror::Error;

use mindcare_core::models::assessment::InstrumentKind;

/// Malformed questionnaire input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstrumentError {
    #[error("{instrument} expects {expected} item scores, got {actual}")]
    WrongItemCount {
        instrument: InstrumentKind,
        expected: usize,
        actual: usize,
    },

    #[error("{instrument} item {index} has score {value}, outside range [{min}, {max}]")]
    ItemOutOfRange {
        instrument: InstrumentKind,
        index: usize,
        value: i64,
        min: u8,
        max: u8,
    },
}
