use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::services::drag::DragError;
use domain::services::planner::PlannerError;
use domain::services::store::StoreError;
use serde::Serialize;
use shared::MonthKeyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => ApiError::ServiceUnavailable(msg),
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::Rejected(msg) => ApiError::Conflict(msg),
        }
    }
}

impl From<DragError> for ApiError {
    fn from(err: DragError) -> Self {
        match err {
            DragError::DayUseNotDraggable | DragError::NotInColumn { .. } => {
                ApiError::Validation(err.to_string())
            }
            DragError::AlreadyDragging | DragError::NotDragging | DragError::CommitInProgress => {
                ApiError::Conflict(err.to_string())
            }
        }
    }
}

impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::Drag(e) => e.into(),
            PlannerError::ReservationNotFound(id) => {
                ApiError::NotFound(format!("Reservation {id} is not shown in the displayed month"))
            }
            PlannerError::InvalidMove(e) => e.into(),
            PlannerError::Store(e) => e.into(),
        }
    }
}

impl From<MonthKeyError> for ApiError {
    fn from(err: MonthKeyError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
            })
            .collect();

        let message = if messages.len() == 1 {
            messages[0].clone()
        } else {
            format!("{} validation errors", messages.len())
        };

        ApiError::Validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (ApiError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::ServiceUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_from_store_error() {
        assert!(matches!(
            ApiError::from(StoreError::Unavailable("db".into())),
            ApiError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            ApiError::from(StoreError::NotFound("r1".into())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(StoreError::Rejected("fk".into())),
            ApiError::Conflict(_)
        ));
    }

    #[test]
    fn test_from_drag_error() {
        assert!(matches!(
            ApiError::from(DragError::DayUseNotDraggable),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(DragError::NotDragging),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(PlannerError::Drag(DragError::CommitInProgress)),
            ApiError::Conflict(_)
        ));
    }

    #[test]
    fn test_from_month_key_error() {
        let err = "2024-13".parse::<shared::MonthKey>().unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Validation(_)));
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).to_string(),
            "Not found: test"
        );
        assert_eq!(
            ApiError::ServiceUnavailable("test".to_string()).to_string(),
            "Service unavailable: test"
        );
    }
}
