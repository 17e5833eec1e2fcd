use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use mindcare_auth::jwt::bearer_token;
use mindcare_core::keys;

use crate::error::ApiError;
use crate::state::AppState;

/// JWT validation middleware.
///
/// Extracts the `Authorization: Bearer <token>` header and validates it with
/// the configured verifier. On success, inserts the caller's
/// [`mindcare_core::models::identity::Identity`] into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());

    let identity = bearer_token(header)
        .and_then(|token| state.verifier.verify(token))
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            ApiError::from(e)
        })?;

    if !keys::is_valid_subject_id(&identity.subject_id) {
        tracing::debug!(sub = %identity.subject_id, "rejected subject id");
        return Err(ApiError::Unauthorized(
            "token subject is not a valid subject id".to_string(),
        ));
    }

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
