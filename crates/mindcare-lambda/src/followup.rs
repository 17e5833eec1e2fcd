//! Store-backed wrapper around the escalation rule, shared by chat and
//! assessment submissions.

use jiff::Timestamp;
use serde_json::json;

use mindcare_audit::events::AuditEvent;
use mindcare_core::keys;
use mindcare_core::models::appointment::Appointment;
use mindcare_core::models::profile::{counsellor_directory, Counsellor, Profile};
use mindcare_core::models::risk::RiskTier;
use mindcare_risk::escalation::maybe_escalate;
use mindcare_storage::error::StorageError;
use mindcare_storage::Store;

/// The counsellor directory, in escalation order.
pub async fn list_counsellors(store: &Store) -> Result<Vec<Counsellor>, StorageError> {
    let profiles: Vec<Profile> = store.list_json(keys::PROFILES_PREFIX).await?;
    Ok(counsellor_directory(&profiles))
}

/// Run the escalation rule for `subject_id` and persist any booking it makes.
pub async fn escalate(
    store: &Store,
    subject_id: &str,
    tier: RiskTier,
    now: Timestamp,
) -> Result<Option<Appointment>, StorageError> {
    if !tier.is_elevated() {
        return Ok(None);
    }

    let counsellors = list_counsellors(store).await?;
    let Some(appointment) = maybe_escalate(subject_id, tier, &counsellors, now) else {
        return Ok(None);
    };

    store
        .put_json(&keys::appointment(appointment.id), &appointment)
        .await?;

    AuditEvent::system(
        "appointment.auto_scheduled",
        "appointment",
        appointment.id.to_string(),
    )
    .with_details(json!({
        "subject_id": appointment.subject_id,
        "counsellor_id": appointment.counsellor_id,
        "tier": tier,
        "date": appointment.date,
    }))
    .emit();

    Ok(Some(appointment))
}
