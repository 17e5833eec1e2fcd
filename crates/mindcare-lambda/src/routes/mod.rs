pub mod analytics;
pub mod appointments;
pub mod assessments;
pub mod chat;
pub mod counsellors;
pub mod forum;
pub mod health;
pub mod instruments;
pub mod profile;

use serde::Deserialize;

use mindcare_core::keys;
use mindcare_core::models::identity::Identity;

use crate::error::ApiError;

/// `?subject_id=` lets staff read another subject's records.
#[derive(Debug, Default, Deserialize)]
pub struct SubjectQuery {
    pub subject_id: Option<String>,
}

impl SubjectQuery {
    /// The subject whose records `identity` asked for, if it may read them.
    pub fn resolve(&self, identity: &Identity) -> Result<String, ApiError> {
        let subject_id = self
            .subject_id
            .clone()
            .unwrap_or_else(|| identity.subject_id.clone());
        if !keys::is_valid_subject_id(&subject_id) {
            return Err(ApiError::BadRequest(format!("invalid subject_id: {subject_id}")));
        }
        if !identity.can_read_subject(&subject_id) {
            return Err(ApiError::Forbidden(
                "students may only read their own records".to_string(),
            ));
        }
        Ok(subject_id)
    }
}

/// Trim `value`, rejecting it when nothing is left.
pub(crate) fn required_text(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
