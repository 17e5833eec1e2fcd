use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::risk::RiskTier;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum AppointmentStatus {
    Scheduled,
    AutoScheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::AutoScheduled => "auto-scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the appointment is still pending.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::AutoScheduled
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A counselling appointment, booked by a student or created by escalation.
///
/// Only `status` ever changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Appointment {
    pub id: Uuid,
    pub subject_id: String,
    pub counsellor_id: String,
    pub date: jiff::civil::Date,
    /// Wall-clock slot as `HH:MM`.
    pub time: String,
    pub status: AppointmentStatus,
    /// The tier that triggered an automatic booking, if any.
    pub tier: Option<RiskTier>,
    pub created_at: jiff::Timestamp,
}

impl Appointment {
    /// An explicit booking made by the subject.
    pub fn book(
        subject_id: impl Into<String>,
        counsellor_id: impl Into<String>,
        date: jiff::civil::Date,
        time: impl Into<String>,
        created_at: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_id: subject_id.into(),
            counsellor_id: counsellor_id.into(),
            date,
            time: time.into(),
            status: AppointmentStatus::Scheduled,
            tier: None,
            created_at,
        }
    }

    /// Move an open appointment to `completed` or `cancelled`.
    pub fn transition(&mut self, next: AppointmentStatus) -> Result<(), CoreError> {
        let allowed = self.status.is_open()
            && matches!(
                next,
                AppointmentStatus::Completed | AppointmentStatus::Cancelled
            );
        if !allowed {
            return Err(CoreError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
