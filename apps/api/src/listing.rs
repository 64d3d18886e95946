use serde::{Deserialize, Serialize};

use crate::models::application::Application;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::status::{ApplicationStatus, CandidateStatus, StatusBadge};

/// Query string for listing views. Blank values mean "no filter".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ListingFilter {
    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn status_filter(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "all")
    }

    pub fn matches_candidate(&self, candidate: &Candidate) -> bool {
        if let Some(wanted) = self.status_filter() {
            match wanted.parse::<CandidateStatus>() {
                Ok(status) if status == candidate.status => {}
                _ => return false,
            }
        }
        match self.needle() {
            None => true,
            Some(needle) => [
                Some(candidate.full_name.as_str()),
                Some(candidate.email.as_str()),
                candidate.phone.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle)),
        }
    }

    pub fn matches_application(&self, application: &Application) -> bool {
        if let Some(wanted) = self.status_filter() {
            match ApplicationStatus::from_wire(wanted) {
                Ok(status) if status == application.status => {}
                _ => return false,
            }
        }
        match self.needle() {
            None => true,
            Some(needle) => [
                application.candidate_name.as_deref(),
                application.candidate_email.as_deref(),
                application.job_title.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Row<T> {
    #[serde(flatten)]
    pub record: T,
    pub badge: StatusBadge,
}

pub fn candidate_rows(candidates: Vec<Candidate>, filter: &ListingFilter) -> Vec<Row<Candidate>> {
    candidates
        .into_iter()
        .filter(|c| filter.matches_candidate(c))
        .map(|c| Row {
            badge: c.status.badge(),
            record: c,
        })
        .collect()
}

/// Newest applications first.
pub fn application_rows(applications: Vec<Application>, filter: &ListingFilter) -> Vec<Row<Application>> {
    let mut rows: Vec<Row<Application>> = applications
        .into_iter()
        .filter(|a| filter.matches_application(a))
        .map(|a| Row {
            badge: a.status.badge(),
            record: a,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.record
            .applied_at
            .cmp(&a.record.applied_at)
            .then(a.record.id.cmp(&b.record.id))
    });
    rows
}

impl From<Job> for Row<Job> {
    fn from(job: Job) -> Self {
        Self {
            badge: job.status.badge(),
            record: job,
        }
    }
}

pub fn job_rows(jobs: Vec<Job>) -> Vec<Row<Job>> {
    jobs.into_iter().map(Row::from).collect()
}
