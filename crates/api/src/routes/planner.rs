//! Planner session endpoints.
//!
//! A session holds one operator's displayed month and drag state. The grid
//! is re-rendered after every state change and returned to the caller.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use domain::models::planner::{ColumnId, PlannerGrid};
use domain::services::drag::DragState;
use domain::services::notification::Notice;
use domain::services::planner::{MoveOutcome, Navigation};
use serde::{Deserialize, Serialize};
use shared::{Language, MonthKey};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::PlannerSession;

/// Request to open a planner session.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    /// `yyyy-MM`; defaults to the current month.
    #[validate(custom(function = "shared::validation::validate_month"))]
    pub month: Option<String>,

    /// Defaults to the configured display language.
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub language: Language,
    pub grid: PlannerGrid,
    pub drag: DragState,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub action: Navigation,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PickUpRequest {
    #[validate(length(min = 1, max = 64, message = "Reservation id must be 1-64 characters"))]
    pub reservation_id: String,
    pub column: ColumnId,
}

/// Target cell for hover and drop.
#[derive(Debug, Deserialize)]
pub struct CellRequest {
    pub day: NaiveDate,
    pub column: ColumnId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResponse {
    #[serde(flatten)]
    pub outcome: MoveOutcome,
    #[serde(flatten)]
    pub view: SessionView,
}

#[derive(Debug, Serialize)]
pub struct CellRouteResponse {
    pub route: String,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

async fn session(state: &AppState, id: Uuid) -> Result<Arc<PlannerSession>, ApiError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Planner session {id} not found")))
}

async fn view(session: &PlannerSession) -> SessionView {
    SessionView {
        session_id: session.id,
        language: session.language,
        grid: session.planner.grid(today()).await,
        drag: session.planner.drag_state().await,
        notices: session.planner.take_notices().await,
    }
}

/// POST /api/v1/planner/sessions
pub async fn open_session(
    State(state): State<AppState>,
    Json(request): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    request.validate()?;

    let month = match request.month.as_deref() {
        Some(month) => month.parse::<MonthKey>()?,
        None => MonthKey::from_date(today()),
    };
    let language = request.language.unwrap_or(state.config.display.language);

    let session = state.sessions.open(month, language).await;
    Ok((StatusCode::CREATED, Json(view(&session).await)))
}

/// DELETE /api/v1/planner/sessions/:session_id
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.close(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "Planner session {session_id} not found"
        )))
    }
}

/// GET /api/v1/planner/sessions/:session_id/grid
pub async fn get_grid(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let session = session(&state, session_id).await?;
    Ok(Json(view(&session).await))
}

/// POST /api/v1/planner/sessions/:session_id/navigate
pub async fn navigate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let session = session(&state, session_id).await?;
    session.planner.navigate(request.action, today()).await;
    Ok(Json(view(&session).await))
}

/// POST /api/v1/planner/sessions/:session_id/drag/pickup
pub async fn pick_up(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PickUpRequest>,
) -> Result<Json<SessionView>, ApiError> {
    request.validate()?;
    let session = session(&state, session_id).await?;
    session
        .planner
        .pick_up(&request.reservation_id, &request.column)
        .await?;
    Ok(Json(view(&session).await))
}

/// POST /api/v1/planner/sessions/:session_id/drag/hover
pub async fn hover(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<CellRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let session = session(&state, session_id).await?;
    session.planner.hover(request.day, &request.column).await?;
    Ok(Json(view(&session).await))
}

/// POST /api/v1/planner/sessions/:session_id/drag/leave
pub async fn leave(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let session = session(&state, session_id).await?;
    session.planner.leave().await;
    Ok(Json(view(&session).await))
}

/// POST /api/v1/planner/sessions/:session_id/drag/drop
pub async fn drop_on(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<CellRequest>,
) -> Result<Json<DropResponse>, ApiError> {
    let session = session(&state, session_id).await?;
    let outcome = session.planner.drop_on(request.day, &request.column).await?;
    Ok(Json(DropResponse {
        outcome,
        view: view(&session).await,
    }))
}

/// POST /api/v1/planner/sessions/:session_id/drag/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let session = session(&state, session_id).await?;
    if session.planner.cancel().await {
        tracing::debug!(session_id = %session_id, "Drag canceled");
    }
    Ok(Json(view(&session).await))
}

/// GET /api/v1/planner/sessions/:session_id/cells/:day/:column
///
/// Route of the reservation occupying the cell, for click navigation.
pub async fn cell_route(
    State(state): State<AppState>,
    Path((session_id, day, column)): Path<(Uuid, NaiveDate, String)>,
) -> Result<Json<CellRouteResponse>, ApiError> {
    let session = session(&state, session_id).await?;
    let column = ColumnId::from(column);
    session
        .planner
        .cell_route(day, &column)
        .await
        .map(|route| Json(CellRouteResponse { route }))
        .ok_or_else(|| ApiError::NotFound(format!("No reservation at {day} in {column}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_session_request_validation() {
        let request = OpenSessionRequest {
            month: Some("2024-03".to_string()),
            language: None,
        };
        assert!(request.validate().is_ok());

        let request = OpenSessionRequest {
            month: Some("03/2024".to_string()),
            language: None,
        };
        assert!(request.validate().is_err());

        assert!(OpenSessionRequest::default().validate().is_ok());
    }

    #[test]
    fn test_pick_up_request_deserialization() {
        let request: PickUpRequest =
            serde_json::from_str(r#"{"reservationId":"r1","column":"day-use"}"#).unwrap();
        assert_eq!(request.reservation_id, "r1");
        assert!(request.column.is_day_use());

        let request: PickUpRequest =
            serde_json::from_str(r#"{"reservationId":"","column":"s1"}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_cell_request_deserialization() {
        let request: CellRequest =
            serde_json::from_str(r#"{"day":"2024-03-12","column":"s2"}"#).unwrap();
        assert_eq!(request.day, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
        assert_eq!(request.column.suite_id(), Some("s2"));
    }
}
