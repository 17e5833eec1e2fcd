use axum::extract::State;

use mindcare_core::models::profile::Counsellor;

use crate::error::ApiError;
use crate::extract::Json;
use crate::followup;
use crate::state::AppState;

pub async fn list_counsellors(
    State(state): State<AppState>,
) -> Result<Json<Vec<Counsellor>>, ApiError> {
    Ok(Json(followup::list_counsellors(&state.store).await?))
}
