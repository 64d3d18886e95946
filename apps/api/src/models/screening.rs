use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, RecordError};

const RECORD: &str = "screening";

/// Output of the upstream CV screening step. The score is computed upstream;
/// this service only reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningResult {
    pub id: u64,
    pub application_id: u64,
    pub candidate_name: Option<String>,
    pub score: f64,
    pub summary: Option<String>,
    pub screened_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScreeningResult {
    pub id: u64,
    pub application_id: Option<u64>,
    pub candidate_name: Option<String>,
    pub score: Option<f64>,
    pub overall_score: Option<f64>,
    pub summary: Option<String>,
    pub screened_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawScreeningResult> for ScreeningResult {
    type Error = RecordError;

    fn try_from(raw: RawScreeningResult) -> Result<Self, Self::Error> {
        let application_id = raw
            .application_id
            .ok_or_else(|| RecordError::missing(RECORD, "applicationId"))?;
        let score = raw
            .score
            .or(raw.overall_score)
            .ok_or_else(|| RecordError::missing(RECORD, "score"))?;
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(RecordError::invalid(RECORD, "score", format!("{score} is outside 0-100")));
        }

        Ok(ScreeningResult {
            id: raw.id,
            application_id,
            candidate_name: non_blank(raw.candidate_name),
            score,
            summary: non_blank(raw.summary),
            screened_at: raw.screened_at.or(raw.created_at),
        })
    }
}
