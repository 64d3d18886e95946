use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::lifecycle::SelectionError;
use crate::offers::OfferError;
use crate::recruitment_client::ApiError;
use crate::scheduling::ScheduleError;
use crate::status::ApplicationStatus;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot move application from {from} to {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Upstream(#[from] ApiError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::NotOffered { from, to } => AppError::InvalidTransition { from, to },
            SelectionError::Locked { .. } => AppError::Validation(err.to_string()),
            SelectionError::Busy => AppError::Conflict(err.to_string()),
        }
    }
}

impl From<OfferError> for AppError {
    fn from(err: OfferError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidTransition { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_TRANSITION",
                self.to_string(),
            ),
            AppError::ConfirmationRequired(msg) => (
                StatusCode::PRECONDITION_REQUIRED,
                "CONFIRMATION_REQUIRED",
                msg.clone(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Upstream(e) => upstream_response_parts(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Client errors from recruitment-service pass through with their status so
/// callers see e.g. 404 or 401; everything else is a gateway failure.
fn upstream_response_parts(err: &ApiError) -> (StatusCode, &'static str, String) {
    match err {
        ApiError::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            "UPSTREAM_TIMEOUT",
            err.to_string(),
        ),
        ApiError::Network(e) => {
            tracing::error!("recruitment-service unreachable: {e}");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                "recruitment-service is unreachable".to_string(),
            )
        }
        ApiError::Http {
            status, message, ..
        } if (400..500).contains(status) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST),
            "UPSTREAM_REJECTED",
            message.clone(),
        ),
        ApiError::Http {
            status,
            message,
            body,
        } => {
            tracing::error!(?body, "recruitment-service error {status}: {message}");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                message.clone(),
            )
        }
        ApiError::Decode(_) | ApiError::Record(_) => {
            tracing::error!("Unusable payload from recruitment-service: {err}");
            (
                StatusCode::BAD_GATEWAY,
                "BAD_UPSTREAM_PAYLOAD",
                "recruitment-service returned an unusable payload".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 64).await.expect("read body");
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    #[tokio::test]
    async fn test_invalid_transition_is_422() {
        let (status, body) = render(AppError::InvalidTransition {
            from: ApplicationStatus::Screening,
            to: ApplicationStatus::Hired,
        })
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_TRANSITION");
        assert_eq!(body["error"]["message"], "Cannot move application from screening to hired");
    }

    #[tokio::test]
    async fn test_upstream_client_errors_pass_through() {
        let (status, body) = render(AppError::Upstream(ApiError::Http {
            status: 404,
            message: "Application 9 not found".into(),
            body: None,
        }))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Application 9 not found");
    }

    #[tokio::test]
    async fn test_upstream_server_errors_become_bad_gateway() {
        let (status, body) = render(AppError::Upstream(ApiError::Http {
            status: 503,
            message: "HTTP 503".into(),
            body: None,
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_timeout_is_gateway_timeout() {
        let (status, body) = render(AppError::Upstream(ApiError::Timeout)).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"]["message"], "Request timeout");
    }

    #[tokio::test]
    async fn test_busy_selection_maps_to_conflict() {
        let (status, _) = render(SelectionError::Busy.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
