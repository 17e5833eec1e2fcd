//! Escalation rule: elevated tiers book a counsellor for the next morning.

use jiff::Timestamp;
use tracing::{info, warn};
use uuid::Uuid;

use mindcare_core::analytics::utc_date;
use mindcare_core::models::appointment::{Appointment, AppointmentStatus};
use mindcare_core::models::profile::Counsellor;
use mindcare_core::models::risk::RiskTier;

/// Slot used for every automatic booking.
pub const AUTO_SCHEDULE_TIME: &str = "10:00";

/// Book a follow-up for `subject_id` when `tier` is high or crisis.
///
/// The first counsellor in `counsellors` is assigned; the pool is not
/// load-balanced. An empty pool is not an error: nothing is booked and the
/// caller decides how to follow up. The rule does not look for an existing
/// open appointment, so callers that need de-duplication must do it.
pub fn maybe_escalate(
    subject_id: &str,
    tier: RiskTier,
    counsellors: &[Counsellor],
    now: Timestamp,
) -> Option<Appointment> {
    if !tier.is_elevated() {
        return None;
    }

    let Some(counsellor) = counsellors.first() else {
        warn!(subject_id, tier = %tier, "no counsellors available for escalation");
        return None;
    };

    let date = match utc_date(now).tomorrow() {
        Ok(date) => date,
        Err(e) => {
            warn!(subject_id, error = %e, "could not compute escalation date");
            return None;
        }
    };

    info!(
        subject_id,
        counsellor_id = %counsellor.id,
        tier = %tier,
        date = %date,
        "auto-scheduling follow-up appointment"
    );

    Some(Appointment {
        id: Uuid::new_v4(),
        subject_id: subject_id.to_string(),
        counsellor_id: counsellor.id.clone(),
        date,
        time: AUTO_SCHEDULE_TIME.to_string(),
        status: AppointmentStatus::AutoScheduled,
        tier: Some(tier),
        created_at: now,
    })
}
