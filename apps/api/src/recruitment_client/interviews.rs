use chrono::{DateTime, Utc};

use super::{ApiError, RecruitmentClient};
use crate::models::interview::{
    Interview, InterviewNote, NewInterview, NewInterviewNote, RawInterview, RawInterviewNote,
    ReschedulePatch,
};
use crate::models::{convert_rows, RawList};

impl RecruitmentClient {
    pub async fn list_interviews(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Interview>, ApiError> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("from", from.to_rfc3339()));
        }
        if let Some(to) = to {
            query.push(("to", to.to_rfc3339()));
        }
        let raw: RawList<RawInterview> = self.get("/interviews", &query).await?;
        Ok(convert_rows(raw.into_items()))
    }

    pub async fn get_interview(&self, id: u64) -> Result<Interview, ApiError> {
        let raw: RawInterview = self.get(&format!("/interviews/{id}"), &[]).await?;
        Ok(Interview::try_from(raw)?)
    }

    pub async fn create_interview(&self, body: &NewInterview) -> Result<Interview, ApiError> {
        let raw: RawInterview = self.post("/interviews", body).await?;
        Ok(Interview::try_from(raw)?)
    }

    pub async fn reschedule_interview(
        &self,
        id: u64,
        patch: &ReschedulePatch,
    ) -> Result<Interview, ApiError> {
        let raw: RawInterview = self.patch(&format!("/interviews/{id}"), patch).await?;
        Ok(Interview::try_from(raw)?)
    }

    pub async fn list_interview_notes(&self, interview_id: u64) -> Result<Vec<InterviewNote>, ApiError> {
        let raw: RawList<RawInterviewNote> = self
            .get(&format!("/interviews/{interview_id}/notes"), &[])
            .await?;
        Ok(convert_rows(raw.into_items()))
    }

    pub async fn add_interview_note(
        &self,
        interview_id: u64,
        body: &NewInterviewNote,
    ) -> Result<InterviewNote, ApiError> {
        let raw: RawInterviewNote = self
            .post(&format!("/interviews/{interview_id}/notes"), body)
            .await?;
        Ok(InterviewNote::try_from(raw)?)
    }
}
