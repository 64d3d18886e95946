use super::{ApiError, RecruitmentClient};
use crate::models::screening::{RawScreeningResult, ScreeningResult};
use crate::models::{convert_rows, RawList};

impl RecruitmentClient {
    pub async fn list_screenings(&self, job_id: Option<u64>) -> Result<Vec<ScreeningResult>, ApiError> {
        let query: Vec<(&str, String)> = job_id
            .map(|id| vec![("jobId", id.to_string())])
            .unwrap_or_default();
        let raw: RawList<RawScreeningResult> = self.get("/screenings", &query).await?;
        Ok(convert_rows(raw.into_items()))
    }
}
