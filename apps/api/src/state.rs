use crate::config::Config;
use crate::recruitment_client::RecruitmentClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Unauthenticated base client; handlers attach the caller's token per request.
    pub client: RecruitmentClient,
    pub config: Config,
}
