use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Serialize;

use super::Upstream;
use crate::errors::AppError;
use crate::listing::{application_rows, candidate_rows, ListingFilter, Row};
use crate::models::application::Application;
use crate::models::candidate::Candidate;

#[derive(Serialize)]
pub struct CandidateDetail {
    #[serde(flatten)]
    pub candidate: Row<Candidate>,
    pub applications: Vec<Row<Application>>,
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    Upstream(client): Upstream,
    Query(filter): Query<ListingFilter>,
) -> Result<Json<Vec<Row<Candidate>>>, AppError> {
    let candidates = client.list_candidates().await?;
    Ok(Json(candidate_rows(candidates, &filter)))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    Upstream(client): Upstream,
    Path(id): Path<u64>,
) -> Result<Json<CandidateDetail>, AppError> {
    let (candidate, applications) = tokio::try_join!(
        client.get_candidate(id),
        client.list_candidate_applications(id)
    )?;
    Ok(Json(CandidateDetail {
        candidate: Row {
            badge: candidate.status.badge(),
            record: candidate,
        },
        applications: application_rows(applications, &ListingFilter::default()),
    }))
}
