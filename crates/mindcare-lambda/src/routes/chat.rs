use axum::extract::State;
use axum::Extension;
use jiff::{Timestamp, ToSpan};
use serde::{Deserialize, Serialize};
use serde_json::json;

use mindcare_audit::events::AuditEvent;
use mindcare_core::analytics::utc_date;
use mindcare_core::keys;
use mindcare_core::models::appointment::Appointment;
use mindcare_core::models::chat::ChatMessage;
use mindcare_core::models::identity::Identity;
use mindcare_risk::classifier::classify;
use mindcare_risk::responses::pick_response;
use mindcare_storage::{counters, Store};

use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::followup;
use crate::routes::{required_text, SubjectQuery};
use crate::state::AppState;

const MAX_KEY_PROBES: usize = 16;

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct SendMessageResponse {
    pub message: ChatMessage,
    pub reply: ChatMessage,
    pub appointment: Option<Appointment>,
}

/// Classify, store, reply, escalate if the tier calls for it, then count.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let text = required_text("text", &req.text)?;
    let subject_id = identity.subject_id.as_str();

    let tier = classify(&text);
    let message = store_message(&state.store, subject_id, Timestamp::now(), |at| {
        ChatMessage::from_user(subject_id, text.as_str(), tier, at)
    })
    .await?;
    let sent_at = message.created_at;

    let reply_text = {
        let mut rng = state.rng.lock().await;
        pick_response(tier, &mut *rng)
    };
    // The reply must sort after the message it answers.
    let earliest_reply = next_millisecond(sent_at)?;
    let reply = store_message(
        &state.store,
        subject_id,
        Timestamp::now().max(earliest_reply),
        |at| ChatMessage::reply(subject_id, reply_text, at),
    )
    .await?;

    if tier.is_elevated() {
        AuditEvent::new("chat.elevated_risk", "chat_message", message.id.to_string(), &identity)
            .with_details(json!({ "tier": tier }))
            .emit();
    }

    let appointment = followup::escalate(&state.store, subject_id, tier, sent_at).await?;

    // The message and any booking are already stored; a lost count must not
    // fail the request.
    if let Err(e) = counters::increment_risk(&state.store, utc_date(sent_at), tier).await {
        tracing::error!(subject_id, tier = %tier, error = %e, "risk counter not incremented");
    }

    Ok(Json(SendMessageResponse {
        message,
        reply,
        appointment,
    }))
}

/// Store a chat message under the first free millisecond at or after `at`.
///
/// Messages are keyed by their creation time, so two writes in the same
/// millisecond would otherwise overwrite each other.
async fn store_message(
    store: &Store,
    subject_id: &str,
    mut at: Timestamp,
    build: impl Fn(Timestamp) -> ChatMessage,
) -> Result<ChatMessage, ApiError> {
    for _ in 0..MAX_KEY_PROBES {
        let message = build(at);
        if store
            .insert_json(&keys::chat_message(subject_id, at), &message)
            .await?
        {
            return Ok(message);
        }
        at = next_millisecond(at)?;
    }
    Err(ApiError::Internal(format!(
        "no free chat key for {subject_id} near {at}"
    )))
}

fn next_millisecond(at: Timestamp) -> Result<Timestamp, ApiError> {
    at.checked_add(1.millisecond())
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// A subject's conversation, oldest first.
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<SubjectQuery>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let subject_id = query.resolve(&identity)?;
    let mut messages: Vec<ChatMessage> = state
        .store
        .list_json(&keys::chat_prefix(&subject_id))
        .await?;
    messages.sort_by_key(|m| m.created_at);
    Ok(Json(messages))
}
