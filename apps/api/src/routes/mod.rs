pub mod applications;
pub mod candidates;
pub mod health;
pub mod interviews;
pub mod jobs;
pub mod screenings;
pub mod statuses;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;

use crate::recruitment_client::RecruitmentClient;
use crate::state::AppState;

const AUTH_COOKIE: &str = "auth_token";

/// recruitment-service client acting as the caller. The `auth_token` cookie
/// is forwarded as a bearer token; without it requests go out unauthenticated
/// and recruitment-service decides.
pub struct Upstream(pub RecruitmentClient);

#[async_trait]
impl FromRequestParts<AppState> for Upstream {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Upstream(state.client.with_token(auth_cookie(parts))))
    }
}

fn auth_cookie(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `?confirm=true` on destructive endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Status registry
        .route("/api/v1/statuses/:kind/:status", get(statuses::handle_badge))
        .route("/api/v1/transitions/:status", get(statuses::handle_transitions))
        // Jobs
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job).delete(jobs::handle_delete_job),
        )
        .route(
            "/api/v1/jobs/:id/applications",
            get(jobs::handle_job_applications),
        )
        // Candidates
        .route("/api/v1/candidates", get(candidates::handle_list_candidates))
        .route("/api/v1/candidates/:id", get(candidates::handle_get_candidate))
        // Applications
        .route("/api/v1/applications/bulk", post(applications::handle_bulk))
        .route("/api/v1/applications/:id", get(applications::handle_get_application))
        .route(
            "/api/v1/applications/:id/status",
            patch(applications::handle_change_status),
        )
        .route(
            "/api/v1/applications/:id/offer",
            post(applications::handle_extend_offer),
        )
        // Screening
        .route("/api/v1/screenings", get(screenings::handle_review_queue))
        // Interviews
        .route(
            "/api/v1/interviews",
            get(interviews::handle_calendar).post(interviews::handle_schedule),
        )
        .route(
            "/api/v1/interviews/:id/reschedule",
            patch(interviews::handle_reschedule),
        )
        .route(
            "/api/v1/interviews/:id/notes",
            get(interviews::handle_list_notes).post(interviews::handle_add_note),
        )
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderMap, Request, StatusCode},
        Json,
    };
    use serde_json::{json, Value};

    #[test]
    fn test_auth_cookie_is_found_among_others() {
        let request = Request::builder()
            .header(header::COOKIE, "theme=dark; auth_token=abc.def ; lang=en")
            .body(())
            .unwrap();
        let (parts, _) = request.into_parts();
        assert_eq!(auth_cookie(&parts), Some("abc.def".to_string()));
    }

    #[test]
    fn test_missing_or_empty_cookie_is_none() {
        let (parts, _) = Request::builder()
            .header(header::COOKIE, "auth_token=")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(auth_cookie(&parts), None);

        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert_eq!(auth_cookie(&parts), None);
    }

    async fn echo_auth(headers: HeaderMap) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none")
            .to_string();
        Json(json!([{
            "id": 1,
            "fullName": auth,
            "email": "ada@example.com",
            "status": "active"
        }]))
    }

    #[tokio::test]
    async fn test_cookie_is_forwarded_as_bearer() {
        let upstream = Router::new().route("/candidates", get(echo_auth));
        let app = gateway(upstream).await;

        let request = Request::builder()
            .uri("/api/v1/candidates")
            .header("cookie", "auth_token=tok-123")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["full_name"], "Bearer tok-123");
    }

    #[tokio::test]
    async fn test_health_needs_no_upstream() {
        let app = gateway(Router::new()).await;
        let (status, body) = call(app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "ats-api");
    }
}
