use super::{ApiError, RecruitmentClient};
use crate::models::job::{Job, RawJob};
use crate::models::{convert_rows, RawList};
use crate::status::JobStatus;

impl RecruitmentClient {
    pub async fn list_jobs(&self, status: Option<JobStatus>) -> Result<Vec<Job>, ApiError> {
        let query: Vec<(&str, String)> = status
            .map(|s| vec![("status", s.to_string())])
            .unwrap_or_default();
        let raw: RawList<RawJob> = self.get("/jobs", &query).await?;
        Ok(convert_rows(raw.into_items()))
    }

    pub async fn get_job(&self, id: u64) -> Result<Job, ApiError> {
        let raw: RawJob = self.get(&format!("/jobs/{id}"), &[]).await?;
        Ok(Job::try_from(raw)?)
    }

    pub async fn delete_job(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/jobs/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::spawn_upstream;
    use super::super::ApiError;
    use crate::status::JobStatus;
    use axum::{
        extract::Query,
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_list_jobs_forwards_status_filter() {
        let router = Router::new().route(
            "/jobs",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let status = q.get("status").cloned().unwrap_or_else(|| "draft".into());
                Json(json!([{ "id": 1, "title": "SRE", "status": status }]))
            }),
        );
        let client = spawn_upstream(router).await;

        let jobs = client.list_jobs(Some(JobStatus::Closed)).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].status, JobStatus::Closed);
    }

    #[tokio::test]
    async fn test_delete_job_accepts_no_content() {
        let router = Router::new().route(
            "/jobs/:id",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "statusCode": 404, "message": "Job not found" })),
                )
            })
            .delete(|| async { StatusCode::NO_CONTENT }),
        );
        let client = spawn_upstream(router).await;

        client.delete_job(5).await.unwrap();

        let err = client.get_job(5).await.unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
        assert_eq!(err.to_string(), "Job not found");
    }
}
