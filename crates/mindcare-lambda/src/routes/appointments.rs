use axum::extract::State;
use axum::Extension;
use jiff::civil::{Date, Time};
use jiff::Timestamp;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use mindcare_audit::events::AuditEvent;
use mindcare_core::analytics::utc_date;
use mindcare_core::keys;
use mindcare_core::models::appointment::{Appointment, AppointmentStatus};
use mindcare_core::models::identity::{Identity, Role};

use crate::error::ApiError;
use crate::extract::{Json, Path};
use crate::followup;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BookAppointmentRequest {
    pub counsellor_id: String,
    pub date: Date,
    /// `HH:MM`
    pub time: String,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

/// Explicit booking by a student.
pub async fn book_appointment(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<BookAppointmentRequest>,
) -> Result<Json<Appointment>, ApiError> {
    if identity.role != Role::Student {
        return Err(ApiError::Forbidden(
            "only students can book appointments".to_string(),
        ));
    }

    let time: Time = req
        .time
        .trim()
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("invalid time '{}': {e}", req.time)))?;

    let now = Timestamp::now();
    if req.date < utc_date(now) {
        return Err(ApiError::BadRequest(
            "appointments cannot be booked in the past".to_string(),
        ));
    }

    let counsellors = followup::list_counsellors(&state.store).await?;
    if !counsellors.iter().any(|c| c.id == req.counsellor_id) {
        return Err(ApiError::NotFound(format!(
            "counsellor not found: {}",
            req.counsellor_id
        )));
    }

    let appointment = Appointment::book(
        identity.subject_id.clone(),
        req.counsellor_id,
        req.date,
        time.strftime("%H:%M").to_string(),
        now,
    );
    state
        .store
        .put_json(&keys::appointment(appointment.id), &appointment)
        .await?;

    AuditEvent::new(
        "appointment.booked",
        "appointment",
        appointment.id.to_string(),
        &identity,
    )
    .emit();

    Ok(Json(appointment))
}

/// Students see their own appointments, counsellors those assigned to them,
/// admins every appointment.
pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let all: Vec<Appointment> = state.store.list_json(keys::APPOINTMENTS_PREFIX).await?;

    let mut visible: Vec<Appointment> = all
        .into_iter()
        .filter(|a| match identity.role {
            Role::Student => a.subject_id == identity.subject_id,
            Role::Counsellor => a.counsellor_id == identity.subject_id,
            Role::Admin => true,
        })
        .collect();
    visible.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));

    Ok(Json(visible))
}

/// Complete or cancel an appointment. Only the assigned counsellor or an
/// admin may do this. The check and the transition run inside one atomic
/// update, so two racing changes cannot both close the appointment.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let mut previous = None;
    let appointment = state
        .store
        .modify_json(&keys::appointment(id), |appointment: &mut Appointment| {
            let allowed = identity.role == Role::Admin
                || (identity.role == Role::Counsellor
                    && appointment.counsellor_id == identity.subject_id);
            if !allowed {
                return Err(ApiError::Forbidden(
                    "only the assigned counsellor can update this appointment".to_string(),
                ));
            }
            previous = Some(appointment.status);
            appointment.transition(req.status).map_err(ApiError::from)
        })
        .await??;

    AuditEvent::new(
        "appointment.status_changed",
        "appointment",
        appointment.id.to_string(),
        &identity,
    )
    .with_details(json!({ "from": previous, "to": appointment.status }))
    .emit();

    Ok(Json(appointment))
}
