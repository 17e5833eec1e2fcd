use thiserror::Error;

use crate::models::appointment::AppointmentStatus;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("cannot move appointment from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("date arithmetic failed: {0}")]
    InvalidDate(#[from] jiff::Error),
}
