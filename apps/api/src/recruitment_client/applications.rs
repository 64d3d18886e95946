use super::{ApiError, RecruitmentClient};
use crate::models::application::{Application, ApplicationPatch, RawApplication};
use crate::models::{convert_rows, RawList};

impl RecruitmentClient {
    pub async fn get_application(&self, id: u64) -> Result<Application, ApiError> {
        let raw: RawApplication = self.get(&format!("/applications/{id}"), &[]).await?;
        Ok(Application::try_from(raw)?)
    }

    pub async fn list_job_applications(&self, job_id: u64) -> Result<Vec<Application>, ApiError> {
        let raw: RawList<RawApplication> =
            self.get(&format!("/jobs/{job_id}/applications"), &[]).await?;
        Ok(convert_rows(raw.into_items()))
    }

    pub async fn list_candidate_applications(
        &self,
        candidate_id: u64,
    ) -> Result<Vec<Application>, ApiError> {
        let raw: RawList<RawApplication> = self
            .get("/applications", &[("candidateId", candidate_id.to_string())])
            .await?;
        Ok(convert_rows(raw.into_items()))
    }

    /// `PATCH /applications/:id`. The only write path for application state.
    pub async fn update_application(
        &self,
        id: u64,
        patch: &ApplicationPatch,
    ) -> Result<Application, ApiError> {
        let raw: RawApplication = self.patch(&format!("/applications/{id}"), patch).await?;
        Ok(Application::try_from(raw)?)
    }
}
