use axum::extract::State;
use axum::Extension;
use jiff::Timestamp;
use serde::Deserialize;

use mindcare_audit::events::AuditEvent;
use mindcare_core::keys;
use mindcare_core::models::identity::Identity;
use mindcare_core::models::profile::Profile;

use crate::error::ApiError;
use crate::extract::Json;
use crate::routes::required_text;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProfileRequest {
    pub name: String,
}

/// Register the caller. Role and email come from the token, not the body.
pub async fn signup(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let name = required_text("name", &req.name)?;
    let key = keys::profile(&identity.subject_id);

    let now = Timestamp::now();
    let profile = Profile {
        id: identity.subject_id.clone(),
        name,
        email: identity.email.clone(),
        role: identity.role,
        created_at: now,
        updated_at: now,
    };
    if !state.store.insert_json(&key, &profile).await? {
        return Err(ApiError::BadRequest("profile already exists".to_string()));
    }

    AuditEvent::new("profile.created", "profile", &profile.id, &identity).emit();

    Ok(Json(profile))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state
        .store
        .require_json(&keys::profile(&identity.subject_id))
        .await?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let name = required_text("name", &req.name)?;
    let key = keys::profile(&identity.subject_id);

    let mut profile: Profile = state.store.require_json(&key).await?;
    profile.name = name;
    profile.updated_at = Timestamp::now();
    state.store.put_json(&key, &profile).await?;

    Ok(Json(profile))
}
