//! Game statistics endpoint.

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::aggregate;
use crate::models::StatsSummary;

/// GET /api/stats/:username
///
/// Fetches the user's games in the configured window and folds them into a
/// summary. The username is lowercased here so the aggregator can compare it
/// against lowercase Lichess handles.
pub async fn user_stats(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<StatsSummary>, ApiError> {
    let username = username.to_lowercase();
    let games = state.provider.games(&username).await?;
    debug!("Aggregating {} games for {}", games.len(), username);

    let summary = aggregate(&games, &username)?;
    Ok(Json(summary))
}
