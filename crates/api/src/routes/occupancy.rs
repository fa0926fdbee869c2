//! House occupancy summary.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use domain::models::planner::OccupancySummary;
use domain::services::planner::occupancy_on;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct OccupancyQuery {
    /// Defaults to the server's local date.
    pub day: Option<NaiveDate>,
}

/// GET /api/v1/occupancy/today
pub async fn today(
    State(state): State<AppState>,
    Query(query): Query<OccupancyQuery>,
) -> Result<Json<OccupancySummary>, ApiError> {
    let day = query.day.unwrap_or_else(|| chrono::Local::now().date_naive());
    let summary = occupancy_on(&state.fetcher, day).await?;
    Ok(Json(summary))
}
