//! Status Registry: status code + entity kind → display label and badge variant.
//!
//! Lookups never fail. A status missing from the kind's table echoes the raw
//! value back with the `outline` variant.

use serde::Serialize;

use super::{ApplicationStatus, CandidateStatus, EntityKind, JobStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Success,
    Warning,
    Destructive,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl StatusBadge {
    fn new(label: &str, variant: BadgeVariant) -> Self {
        Self {
            label: label.to_string(),
            variant,
        }
    }

    fn fallback(raw: &str) -> Self {
        Self {
            label: raw.to_string(),
            variant: BadgeVariant::Outline,
        }
    }
}

fn application_entry(status: ApplicationStatus) -> (&'static str, BadgeVariant) {
    use ApplicationStatus::*;
    match status {
        Submitted => ("Submitted", BadgeVariant::Secondary),
        Pending => ("Pending", BadgeVariant::Secondary),
        Screening => ("Screening", BadgeVariant::Default),
        ScreeningPassed => ("Screening Passed", BadgeVariant::Success),
        ScreeningFailed => ("Screening Failed", BadgeVariant::Destructive),
        PassedExam => ("Passed Exam", BadgeVariant::Success),
        FailedExam => ("Failed Exam", BadgeVariant::Destructive),
        Interviewing => ("Interviewing", BadgeVariant::Default),
        InterviewScheduled => ("Interview Scheduled", BadgeVariant::Default),
        Offer => ("Offer Extended", BadgeVariant::Warning),
        Hired => ("Hired", BadgeVariant::Success),
        Rejected => ("Rejected", BadgeVariant::Destructive),
        Withdrawn => ("Withdrawn", BadgeVariant::Secondary),
    }
}

fn job_entry(status: JobStatus) -> (&'static str, BadgeVariant) {
    match status {
        JobStatus::Draft => ("Draft", BadgeVariant::Secondary),
        JobStatus::Published => ("Published", BadgeVariant::Success),
        JobStatus::Closed => ("Closed", BadgeVariant::Destructive),
    }
}

fn candidate_entry(status: CandidateStatus) -> (&'static str, BadgeVariant) {
    match status {
        CandidateStatus::Active => ("Active", BadgeVariant::Success),
        CandidateStatus::Inactive => ("Inactive", BadgeVariant::Secondary),
        CandidateStatus::New => ("New", BadgeVariant::Default),
        CandidateStatus::Application(inner) => application_entry(inner),
    }
}

/// Looks up the badge for a raw status string within one entity kind's table.
pub fn badge_for(kind: EntityKind, raw: &str) -> StatusBadge {
    let entry = match kind {
        EntityKind::Application => raw.parse().ok().map(application_entry),
        EntityKind::Job => raw.parse().ok().map(job_entry),
        EntityKind::Candidate => raw.parse().ok().map(candidate_entry),
    };

    match entry {
        Some((label, variant)) => StatusBadge::new(label, variant),
        None => StatusBadge::fallback(raw),
    }
}

impl ApplicationStatus {
    pub fn badge(&self) -> StatusBadge {
        let (label, variant) = application_entry(*self);
        StatusBadge::new(label, variant)
    }
}

impl JobStatus {
    pub fn badge(&self) -> StatusBadge {
        let (label, variant) = job_entry(*self);
        StatusBadge::new(label, variant)
    }
}

impl CandidateStatus {
    pub fn badge(&self) -> StatusBadge {
        let (label, variant) = candidate_entry(*self);
        StatusBadge::new(label, variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_application_status_has_label() {
        let badge = badge_for(EntityKind::Application, "screening_passed");
        assert_eq!(badge.label, "Screening Passed");
        assert_eq!(badge.variant, BadgeVariant::Success);
    }

    #[test]
    fn test_unknown_status_echoes_raw_value_with_outline() {
        for (kind, raw) in [
            (EntityKind::Application, "on_hold"),
            (EntityKind::Job, "archived"),
            (EntityKind::Candidate, ""),
            (EntityKind::Candidate, "Active"),
        ] {
            let badge = badge_for(kind, raw);
            assert_eq!(badge.label, raw);
            assert_eq!(badge.variant, BadgeVariant::Outline);
        }
    }

    #[test]
    fn test_tables_are_scoped_per_kind() {
        // "published" is a job status, not an application status.
        assert_eq!(badge_for(EntityKind::Job, "published").label, "Published");
        assert_eq!(
            badge_for(EntityKind::Application, "published").variant,
            BadgeVariant::Outline
        );
    }

    #[test]
    fn test_candidate_table_includes_application_statuses() {
        assert_eq!(badge_for(EntityKind::Candidate, "hired").label, "Hired");
        assert_eq!(badge_for(EntityKind::Candidate, "inactive").label, "Inactive");
    }

    #[test]
    fn test_typed_badge_matches_raw_lookup() {
        for status in ApplicationStatus::ALL {
            assert_eq!(
                status.badge(),
                badge_for(EntityKind::Application, status.as_str())
            );
        }
    }
}
