use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, RecordError};

const RECORD: &str = "interview";
const NOTE_RECORD: &str = "interview note";

/// Interviews scheduled without an explicit end last one hour.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    Confirmed,
    Rescheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl InterviewStatus {
    fn from_wire(raw: &str) -> Result<Self, RecordError> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "scheduled" => Ok(InterviewStatus::Scheduled),
            "confirmed" => Ok(InterviewStatus::Confirmed),
            "rescheduled" => Ok(InterviewStatus::Rescheduled),
            "completed" => Ok(InterviewStatus::Completed),
            "cancelled" | "canceled" => Ok(InterviewStatus::Cancelled),
            "no_show" => Ok(InterviewStatus::NoShow),
            other => Err(RecordError::invalid(
                RECORD,
                "status",
                format!("unknown interview status '{other}'"),
            )),
        }
    }

    /// Completed, cancelled and no-show interviews are history and stay put.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            InterviewStatus::Completed | InterviewStatus::Cancelled | InterviewStatus::NoShow
        )
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Confirmed => "confirmed",
            InterviewStatus::Rescheduled => "rescheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
            InterviewStatus::NoShow => "no_show",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interview {
    pub id: u64,
    pub application_id: u64,
    pub candidate_name: Option<String>,
    pub interviewer: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: InterviewStatus,
    pub location: Option<String>,
}

impl Interview {
    pub fn duration(&self) -> Duration {
        self.ends_at - self.starts_at
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInterview {
    pub id: u64,
    pub application_id: Option<u64>,
    pub candidate_name: Option<String>,
    pub interviewer: Option<String>,
    pub interviewer_name: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
}

impl TryFrom<RawInterview> for Interview {
    type Error = RecordError;

    fn try_from(raw: RawInterview) -> Result<Self, Self::Error> {
        let application_id = raw
            .application_id
            .ok_or_else(|| RecordError::missing(RECORD, "applicationId"))?;
        let starts_at = raw
            .scheduled_at
            .or(raw.start_time)
            .ok_or_else(|| RecordError::missing(RECORD, "scheduledAt"))?;

        let ends_at = match raw.end_time {
            Some(end) => end,
            None => {
                let minutes = raw.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
                Duration::try_minutes(minutes)
                    .and_then(|d| starts_at.checked_add_signed(d))
                    .ok_or_else(|| {
                        RecordError::invalid(RECORD, "durationMinutes", "is out of range")
                    })?
            }
        };
        if ends_at <= starts_at {
            return Err(RecordError::invalid(RECORD, "endTime", "must be after the start"));
        }

        let status = match non_blank(raw.status) {
            Some(s) => InterviewStatus::from_wire(&s)?,
            None => InterviewStatus::Scheduled,
        };

        Ok(Interview {
            id: raw.id,
            application_id,
            candidate_name: non_blank(raw.candidate_name),
            interviewer: non_blank(raw.interviewer).or_else(|| non_blank(raw.interviewer_name)),
            starts_at,
            ends_at,
            status,
            location: non_blank(raw.location).or_else(|| non_blank(raw.meeting_url)),
        })
    }
}

/// Body of `POST /interviews`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterview {
    pub application_id: u64,
    pub scheduled_at: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interviewer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Body of `PATCH /interviews/:id` when an interview is moved on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReschedulePatch {
    pub scheduled_at: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: InterviewStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewNote {
    pub id: u64,
    pub interview_id: u64,
    pub author: Option<String>,
    pub content: String,
    pub rating: Option<u8>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInterviewNote {
    pub id: u64,
    pub interview_id: Option<u64>,
    pub author: Option<String>,
    pub author_name: Option<String>,
    pub content: Option<String>,
    pub note: Option<String>,
    pub rating: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawInterviewNote> for InterviewNote {
    type Error = RecordError;

    fn try_from(raw: RawInterviewNote) -> Result<Self, Self::Error> {
        let interview_id = raw
            .interview_id
            .ok_or_else(|| RecordError::missing(NOTE_RECORD, "interviewId"))?;
        let content = non_blank(raw.content)
            .or_else(|| non_blank(raw.note))
            .ok_or_else(|| RecordError::missing(NOTE_RECORD, "content"))?;
        let rating = raw
            .rating
            .map(|r| {
                u8::try_from(r)
                    .ok()
                    .filter(|r| (1..=5).contains(r))
                    .ok_or_else(|| RecordError::invalid(NOTE_RECORD, "rating", format!("{r} is outside 1-5")))
            })
            .transpose()?;

        Ok(InterviewNote {
            id: raw.id,
            interview_id,
            author: non_blank(raw.author).or_else(|| non_blank(raw.author_name)),
            content,
            rating,
            created_at: raw.created_at,
        })
    }
}

/// Body of `POST /interviews/:id/notes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterviewNote {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}
