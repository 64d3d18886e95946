use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use super::Upstream;
use crate::errors::AppError;
use crate::screening::{review_queue, summarize, ScreeningSummary, ScreeningView};

#[derive(Debug, Deserialize)]
pub struct ScreeningQuery {
    #[serde(default)]
    pub job_id: Option<u64>,
}

#[derive(Serialize)]
pub struct ReviewQueueResponse {
    pub summary: ScreeningSummary,
    pub results: Vec<ScreeningView>,
}

/// GET /api/v1/screenings
pub async fn handle_review_queue(
    Upstream(client): Upstream,
    Query(query): Query<ScreeningQuery>,
) -> Result<Json<ReviewQueueResponse>, AppError> {
    let results = review_queue(client.list_screenings(query.job_id).await?);
    Ok(Json(ReviewQueueResponse {
        summary: summarize(&results),
        results,
    }))
}
