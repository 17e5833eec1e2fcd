//! Store key conventions.
//!
//! Pure string functions with no storage dependency. These define the canonical
//! layout of records in the key-value store, and must stay stable so that
//! dashboards and older deployments read the same keys.

use jiff::civil::Date;
use jiff::Timestamp;
use uuid::Uuid;

/// Subject ids are embedded in composite keys such as `chat:<subject>:<ms>`,
/// so a subject containing `:` would read into another subject's range.
pub fn is_valid_subject_id(subject_id: &str) -> bool {
    !subject_id.is_empty() && !subject_id.contains(':')
}

pub const PROFILES_PREFIX: &str = "profile:";

pub fn profile(subject_id: &str) -> String {
    format!("profile:{subject_id}")
}

pub fn chat_prefix(subject_id: &str) -> String {
    format!("chat:{subject_id}:")
}

/// Chat messages are keyed by their creation time in milliseconds.
pub fn chat_message(subject_id: &str, created_at: Timestamp) -> String {
    format!("chat:{subject_id}:{}", created_at.as_millisecond())
}

pub const APPOINTMENTS_PREFIX: &str = "appointment:";

pub fn appointment(id: Uuid) -> String {
    format!("appointment:{id}")
}

pub fn assessment_prefix(subject_id: &str) -> String {
    format!("assessment:{subject_id}:")
}

pub fn assessment(subject_id: &str, id: Uuid) -> String {
    format!("assessment:{subject_id}:{id}")
}

pub const FORUM_PREFIX: &str = "forum:";

pub fn forum_post(id: Uuid) -> String {
    format!("forum:{id}")
}

pub const RISK_COUNTERS_PREFIX: &str = "analytics:risk:";

pub fn risk_counter(date: Date) -> String {
    format!("analytics:risk:{date}")
}

pub const ASSESSMENT_COUNTERS_PREFIX: &str = "analytics:assessment:";

pub fn assessment_counter(date: Date) -> String {
    format!("analytics:assessment:{date}")
}
