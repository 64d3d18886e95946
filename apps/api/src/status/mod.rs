//! Status vocabulary for the hiring pipeline.
//!
//! One canonical definition per entity kind. Labels, badge variants and the
//! transition table all hang off these enums so views never carry their own
//! copies of the tables.

pub mod registry;
pub mod transitions;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use registry::{badge_for, BadgeVariant, StatusBadge};
pub use transitions::{is_allowed, is_terminal, next_statuses, next_statuses_raw};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} status '{value}'")]
pub struct UnknownStatus {
    pub kind: EntityKind,
    pub value: String,
}

/// Stage of a candidate's application in the hiring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    Pending,
    Screening,
    ScreeningPassed,
    ScreeningFailed,
    PassedExam,
    FailedExam,
    Interviewing,
    InterviewScheduled,
    Offer,
    Hired,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 13] = [
        ApplicationStatus::Submitted,
        ApplicationStatus::Pending,
        ApplicationStatus::Screening,
        ApplicationStatus::ScreeningPassed,
        ApplicationStatus::ScreeningFailed,
        ApplicationStatus::PassedExam,
        ApplicationStatus::FailedExam,
        ApplicationStatus::Interviewing,
        ApplicationStatus::InterviewScheduled,
        ApplicationStatus::Offer,
        ApplicationStatus::Hired,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::ScreeningPassed => "screening_passed",
            ApplicationStatus::ScreeningFailed => "screening_failed",
            ApplicationStatus::PassedExam => "passed_exam",
            ApplicationStatus::FailedExam => "failed_exam",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::InterviewScheduled => "interview_scheduled",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    /// Parses a status coming off the wire, accepting the older vocabulary
    /// some upstream endpoints still emit.
    pub fn from_wire(raw: &str) -> Result<Self, UnknownStatus> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "reviewing" => Ok(ApplicationStatus::Screening),
            "interview" => Ok(ApplicationStatus::Interviewing),
            "accepted" => Ok(ApplicationStatus::Hired),
            other => other.parse(),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus {
                kind: EntityKind::Application,
                value: s.to_string(),
            })
    }
}

/// Publication lifecycle of a job requisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    Published,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Published => "published",
            JobStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(JobStatus::Draft),
            "published" => Ok(JobStatus::Published),
            "closed" => Ok(JobStatus::Closed),
            other => Err(UnknownStatus {
                kind: EntityKind::Job,
                value: other.to_string(),
            }),
        }
    }
}

/// Status shown on candidate records. Either the candidate's own record state
/// or the status of their latest application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CandidateStatus {
    Active,
    Inactive,
    New,
    Application(ApplicationStatus),
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Active => "active",
            CandidateStatus::Inactive => "inactive",
            CandidateStatus::New => "new",
            CandidateStatus::Application(status) => status.as_str(),
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CandidateStatus::Active),
            "inactive" => Ok(CandidateStatus::Inactive),
            "new" => Ok(CandidateStatus::New),
            other => other
                .parse::<ApplicationStatus>()
                .map(CandidateStatus::Application)
                .map_err(|_| UnknownStatus {
                    kind: EntityKind::Candidate,
                    value: other.to_string(),
                }),
        }
    }
}

impl TryFrom<String> for CandidateStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CandidateStatus> for String {
    fn from(value: CandidateStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Which status table a raw status string is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Application,
    Job,
    Candidate,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Application => "application",
            EntityKind::Job => "job",
            EntityKind::Candidate => "candidate",
        };
        f.write_str(name)
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "application" => Ok(EntityKind::Application),
            "job" => Ok(EntityKind::Job),
            "candidate" => Ok(EntityKind::Candidate),
            other => Err(format!("unknown entity kind '{other}'")),
        }
    }
}
