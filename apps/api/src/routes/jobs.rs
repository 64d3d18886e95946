use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::{ConfirmQuery, Upstream};
use crate::errors::AppError;
use crate::listing::{application_rows, job_rows, ListingFilter, Row};
use crate::models::application::Application;
use crate::models::job::Job;
use crate::status::JobStatus;

#[derive(Debug, Default, Deserialize)]
pub struct JobsQuery {
    #[serde(default)]
    pub status: Option<String>,
}

impl JobsQuery {
    fn status(&self) -> Result<Option<JobStatus>, AppError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(raw) => raw
                .parse::<JobStatus>()
                .map(Some)
                .map_err(|e| AppError::Validation(e.to_string())),
        }
    }
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    Upstream(client): Upstream,
    Query(query): Query<JobsQuery>,
) -> Result<Json<Vec<Row<Job>>>, AppError> {
    let status = query.status()?;
    let mut jobs = client.list_jobs(status).await?;
    // recruitment-service may ignore the filter
    if let Some(status) = status {
        jobs.retain(|job| job.status == status);
    }
    Ok(Json(job_rows(jobs)))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    Upstream(client): Upstream,
    Path(id): Path<u64>,
) -> Result<Json<Row<Job>>, AppError> {
    Ok(Json(Row::from(client.get_job(id).await?)))
}

/// GET /api/v1/jobs/:id/applications
pub async fn handle_job_applications(
    Upstream(client): Upstream,
    Path(id): Path<u64>,
    Query(filter): Query<ListingFilter>,
) -> Result<Json<Vec<Row<Application>>>, AppError> {
    let applications = client.list_job_applications(id).await?;
    Ok(Json(application_rows(applications, &filter)))
}

/// DELETE /api/v1/jobs/:id?confirm=true
pub async fn handle_delete_job(
    Upstream(client): Upstream,
    Path(id): Path<u64>,
    Query(query): Query<ConfirmQuery>,
) -> Result<StatusCode, AppError> {
    if !query.confirm {
        return Err(AppError::ConfirmationRequired(format!(
            "Deleting job {id} cannot be undone; repeat with confirm=true"
        )));
    }
    client.delete_job(id).await?;
    info!("Deleted job {id}");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::*;
    use axum::{
        body::Body,
        extract::{Path, Query},
        http::{Request, StatusCode},
        routing::{delete, get},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn jobs(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
        let all = vec![
            json!({"id": 1, "title": "Backend Engineer", "jobStatus": "published", "applicationCount": 4}),
            json!({"id": 2, "title": "Designer", "jobStatus": "DRAFT"}),
        ];
        let rows: Vec<Value> = match q.get("status") {
            Some(s) => all
                .into_iter()
                .filter(|j| j["jobStatus"].as_str().unwrap().eq_ignore_ascii_case(s))
                .collect(),
            None => all,
        };
        Json(json!({ "data": rows, "statusCode": 200 }))
    }

    #[tokio::test]
    async fn test_jobs_listing_with_badges() {
        let app = gateway(Router::new().route("/jobs", get(jobs))).await;

        let (status, body) = call(app.clone(), get_request("/api/v1/jobs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["badge"]["label"], "Published");
        assert_eq!(body[1]["status"], "draft");

        let (_, body) = call(app.clone(), get_request("/api/v1/jobs?status=draft")).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["title"], "Designer");

        let (status, _) = call(app, get_request("/api/v1/jobs?status=archived")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let deletes = Arc::new(AtomicUsize::new(0));
        let counter = deletes.clone();
        let upstream = Router::new().route(
            "/jobs/:id",
            delete(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    StatusCode::NO_CONTENT
                }
            }),
        );
        let app = gateway(upstream).await;

        let unconfirmed = Request::builder()
            .method("DELETE")
            .uri("/api/v1/jobs/7")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(app.clone(), unconfirmed).await;
        assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
        assert_eq!(body["error"]["code"], "CONFIRMATION_REQUIRED");
        assert_eq!(deletes.load(Ordering::SeqCst), 0);

        let confirmed = Request::builder()
            .method("DELETE")
            .uri("/api/v1/jobs/7?confirm=true")
            .body(Body::empty())
            .unwrap();
        let (status, _) = call(app, confirmed).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_job_detail_passes_through_not_found() {
        let upstream = Router::new().route(
            "/jobs/:id",
            get(|Path(id): Path<u64>| async move {
                if id == 1 {
                    (
                        StatusCode::OK,
                        Json(json!({"id": 1, "title": "Backend Engineer", "jobStatus": "closed"})),
                    )
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({"message": "Job not found"})))
                }
            }),
        );
        let app = gateway(upstream).await;

        let (status, body) = call(app.clone(), get_request("/api/v1/jobs/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Backend Engineer");
        assert_eq!(body["badge"]["label"], "Closed");

        let (status, body) = call(app, get_request("/api/v1/jobs/9")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Job not found");
    }

    #[tokio::test]
    async fn test_job_applications_filtered_locally() {
        let upstream = Router::new().route(
            "/jobs/:id/applications",
            get(|| async {
                Json(json!([
                    {"id": 1, "jobId": 3, "candidateId": 1, "applicationStatus": "screening",
                     "candidate": {"fullName": "Ada Lovelace"}, "createdAt": "2026-09-01T08:00:00Z"},
                    {"id": 2, "jobId": 3, "candidateId": 2, "applicationStatus": "rejected",
                     "candidate": {"fullName": "Alan Turing"}, "createdAt": "2026-09-02T08:00:00Z"}
                ]))
            }),
        );
        let app = gateway(upstream).await;

        let (status, body) = call(app, get_request("/api/v1/jobs/3/applications?search=ada")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["candidate_name"], "Ada Lovelace");
        assert_eq!(body[0]["badge"]["label"], "Screening");
    }
}
