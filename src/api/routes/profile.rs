//! User profile passthrough endpoint.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::ApiError;

/// GET /api/user/:username
///
/// Returns the upstream profile JSON unchanged.
pub async fn user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.provider.profile(&username).await?;
    Ok(Json(profile))
}
