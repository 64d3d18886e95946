use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::application::ApplicationPatch;
use crate::recruitment_client::RecruitmentClient;
use crate::status::ApplicationStatus;

/// Applies a chosen status somewhere authoritative. Implement this to drive a
/// [`super::StatusTransitionControl`] against any backend.
#[async_trait]
pub trait StatusUpdater: Send + Sync {
    async fn update_status(&self, new_status: ApplicationStatus) -> Result<(), AppError>;
}

/// Writes status changes for one application to recruitment-service.
pub struct ApplicationStatusUpdater {
    client: RecruitmentClient,
    application_id: u64,
}

impl ApplicationStatusUpdater {
    pub fn new(client: RecruitmentClient, application_id: u64) -> Self {
        Self {
            client,
            application_id,
        }
    }
}

#[async_trait]
impl StatusUpdater for ApplicationStatusUpdater {
    async fn update_status(&self, new_status: ApplicationStatus) -> Result<(), AppError> {
        self.client
            .update_application(self.application_id, &ApplicationPatch::status(new_status))
            .await?;
        Ok(())
    }
}
