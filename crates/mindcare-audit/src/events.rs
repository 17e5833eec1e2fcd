use serde::Serialize;
use tracing::info;

use mindcare_core::models::identity::Identity;

/// A structured audit event for a domain action.
///
/// Events are logged via `tracing` so they land in CloudWatch Logs next to
/// the per-request `api_request` lines.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub actor_id: String,
    pub actor_role: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        actor: &Identity,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            actor_id: actor.subject_id.clone(),
            actor_role: actor.role.to_string(),
            details: None,
        }
    }

    /// An action the system took on its own, such as an automatic booking.
    pub fn system(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            actor_id: "system".to_string(),
            actor_role: "system".to_string(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.actor_id = %self.actor_id,
            audit.actor_role = %self.actor_role,
            audit.details = %details,
            "audit event"
        );
    }
}
