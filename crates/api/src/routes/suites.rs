//! Suite listing.

use axum::{extract::State, Json};
use domain::models::suite::ListSuitesResponse;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/suites
///
/// Suites ordered by name, from the shared cache.
pub async fn list_suites(State(state): State<AppState>) -> Result<Json<ListSuitesResponse>, ApiError> {
    let suites = state.fetcher.suites().await?;
    Ok(Json(ListSuitesResponse {
        total: suites.len(),
        suites,
    }))
}
