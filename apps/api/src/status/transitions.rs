//! Transition Table: legal next statuses per current application status.
//!
//! Advisory only. It limits what this service offers and forwards; the
//! recruitment-service remains authoritative and may accept or refuse
//! differently.

use super::ApplicationStatus;
use super::ApplicationStatus::*;

/// Ordered successors of `current`. Terminal statuses yield an empty slice.
pub fn next_statuses(current: ApplicationStatus) -> &'static [ApplicationStatus] {
    match current {
        Submitted => &[Pending, Screening, Rejected],
        Pending => &[Screening, Rejected],
        Screening => &[ScreeningPassed, ScreeningFailed, Rejected],
        ScreeningPassed => &[PassedExam, FailedExam, Interviewing, Rejected],
        ScreeningFailed => &[Screening, Rejected],
        PassedExam => &[Interviewing, InterviewScheduled, Rejected],
        FailedExam => &[Rejected],
        Interviewing => &[InterviewScheduled, Offer, Rejected],
        InterviewScheduled => &[Interviewing, Offer, Rejected],
        Offer => &[Hired, Rejected, Withdrawn],
        Hired | Rejected | Withdrawn => &[],
    }
}

/// Same lookup keyed by a raw status string; unknown strings have no successors.
pub fn next_statuses_raw(raw: &str) -> &'static [ApplicationStatus] {
    raw.parse::<ApplicationStatus>()
        .map(next_statuses)
        .unwrap_or(&[])
}

pub fn is_terminal(status: ApplicationStatus) -> bool {
    next_statuses(status).is_empty()
}

pub fn is_allowed(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    next_statuses(from).contains(&to)
}
