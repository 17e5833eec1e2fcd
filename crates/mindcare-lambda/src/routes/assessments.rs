use axum::extract::State;
use axum::Extension;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use mindcare_audit::events::AuditEvent;
use mindcare_core::analytics::utc_date;
use mindcare_core::keys;
use mindcare_core::models::appointment::Appointment;
use mindcare_core::models::assessment::{AssessmentSubmission, InstrumentKind};
use mindcare_core::models::identity::Identity;
use mindcare_instruments::get_instrument;
use mindcare_storage::counters;

use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::followup;
use crate::routes::SubjectQuery;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitAssessmentRequest {
    pub instrument: InstrumentKind,
    pub item_scores: Vec<i64>,
}

#[derive(Serialize)]
pub struct SubmitAssessmentResponse {
    pub submission: AssessmentSubmission,
    pub appointment: Option<Appointment>,
}

/// Score, store, escalate if the tier calls for it, then count.
pub async fn submit_assessment(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<SubmitAssessmentRequest>,
) -> Result<Json<SubmitAssessmentResponse>, ApiError> {
    let instrument = get_instrument(req.instrument);
    let items = instrument.validate_items(&req.item_scores)?;
    let result = instrument.score(&req.item_scores)?;

    let submitted_at = Timestamp::now();
    let submission = AssessmentSubmission {
        id: Uuid::new_v4(),
        subject_id: identity.subject_id.clone(),
        instrument: req.instrument,
        item_scores: items,
        total_score: result.total,
        severity_label: result.severity_label,
        tier: result.tier,
        submitted_at,
    };
    state
        .store
        .put_json(
            &keys::assessment(&submission.subject_id, submission.id),
            &submission,
        )
        .await?;

    AuditEvent::new(
        "assessment.submitted",
        "assessment",
        submission.id.to_string(),
        &identity,
    )
    .with_details(json!({
        "instrument": submission.instrument,
        "total": submission.total_score,
        "tier": submission.tier,
    }))
    .emit();

    let appointment =
        followup::escalate(&state.store, &submission.subject_id, submission.tier, submitted_at)
            .await?;

    if let Err(e) =
        counters::increment_assessment(&state.store, utc_date(submitted_at), req.instrument).await
    {
        tracing::error!(
            subject_id = %submission.subject_id,
            instrument = %req.instrument,
            error = %e,
            "assessment counter not incremented"
        );
    }

    Ok(Json(SubmitAssessmentResponse {
        submission,
        appointment,
    }))
}

/// A subject's submissions, newest first.
pub async fn list_assessments(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<SubjectQuery>,
) -> Result<Json<Vec<AssessmentSubmission>>, ApiError> {
    let subject_id = query.resolve(&identity)?;
    let mut submissions: Vec<AssessmentSubmission> = state
        .store
        .list_json(&keys::assessment_prefix(&subject_id))
        .await?;
    submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    Ok(Json(submissions))
}
