use super::{ApiError, RecruitmentClient};
use crate::models::candidate::{Candidate, RawCandidate};
use crate::models::{convert_rows, RawList};

impl RecruitmentClient {
    pub async fn list_candidates(&self) -> Result<Vec<Candidate>, ApiError> {
        let raw: RawList<RawCandidate> = self.get("/candidates", &[]).await?;
        Ok(convert_rows(raw.into_items()))
    }

    pub async fn get_candidate(&self, id: u64) -> Result<Candidate, ApiError> {
        let raw: RawCandidate = self.get(&format!("/candidates/{id}"), &[]).await?;
        Ok(Candidate::try_from(raw)?)
    }
}
