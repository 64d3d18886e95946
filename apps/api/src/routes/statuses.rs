use axum::{extract::Path, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::lifecycle::StatusOption;
use crate::status::{badge_for, next_statuses_raw, EntityKind, StatusBadge};

#[derive(Serialize)]
pub struct TransitionsResponse {
    pub current: String,
    pub next: Vec<StatusOption>,
}

/// GET /api/v1/statuses/:kind/:status
pub async fn handle_badge(
    Path((kind, status)): Path<(String, String)>,
) -> Result<Json<StatusBadge>, AppError> {
    let kind: EntityKind = kind.parse().map_err(AppError::NotFound)?;
    Ok(Json(badge_for(kind, &status)))
}

/// GET /api/v1/transitions/:status
pub async fn handle_transitions(Path(status): Path<String>) -> Json<TransitionsResponse> {
    let next = next_statuses_raw(&status)
        .iter()
        .copied()
        .map(StatusOption::from)
        .collect();
    Json(TransitionsResponse {
        current: status,
        next,
    })
}
