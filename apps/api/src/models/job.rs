use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, RecordError};
use crate::status::JobStatus;

const RECORD: &str = "job";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: u64,
    pub title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub status: JobStatus,
    pub application_count: u32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJob {
    pub id: u64,
    pub title: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub job_status: Option<String>,
    pub application_count: Option<u32>,
    pub applications_count: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawJob> for Job {
    type Error = RecordError;

    fn try_from(raw: RawJob) -> Result<Self, Self::Error> {
        let title = non_blank(raw.title).ok_or_else(|| RecordError::missing(RECORD, "title"))?;
        let status = raw
            .job_status
            .or(raw.status)
            .ok_or_else(|| RecordError::missing(RECORD, "status"))?
            .trim()
            .to_ascii_lowercase()
            .parse::<JobStatus>()?;

        Ok(Job {
            id: raw.id,
            title,
            department: non_blank(raw.department),
            location: non_blank(raw.location),
            status,
            application_count: raw
                .application_count
                .or(raw.applications_count)
                .unwrap_or(0),
            created_at: raw.created_at,
        })
    }
}
