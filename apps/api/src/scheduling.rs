//! Interview calendar rules: what may be scheduled or moved, and how events
//! are colored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::interview::{
    Interview, InterviewStatus, NewInterview, NewInterviewNote, ReschedulePatch,
    DEFAULT_DURATION_MINUTES,
};

const MAX_DURATION_HOURS: i64 = 8;
const MAX_NOTE_CHARS: usize = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Interviews cannot start in the past")]
    StartInPast,

    #[error("Interview must end after it starts")]
    EndBeforeStart,

    #[error("Interviews cannot be longer than {} hours", MAX_DURATION_HOURS)]
    TooLong,

    #[error("Interview end time is out of range")]
    OutOfRange,

    #[error("A {0} interview cannot be moved")]
    Closed(InterviewStatus),

    #[error("Interview notes cannot be empty")]
    EmptyNote,

    #[error("Interview notes are limited to {} characters", MAX_NOTE_CHARS)]
    NoteTooLong,

    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
}

pub fn calendar_color(status: InterviewStatus) -> &'static str {
    match status {
        InterviewStatus::Scheduled => "#3b82f6",
        InterviewStatus::Confirmed => "#22c55e",
        InterviewStatus::Rescheduled => "#f59e0b",
        InterviewStatus::Completed => "#6b7280",
        InterviewStatus::Cancelled => "#ef4444",
        InterviewStatus::NoShow => "#a855f7",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub id: u64,
    pub application_id: u64,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: InterviewStatus,
    pub color: &'static str,
    /// Whether the UI should allow dragging this event.
    pub editable: bool,
}

impl CalendarEvent {
    pub fn from_interview(interview: &Interview, now: DateTime<Utc>) -> Self {
        let title = match &interview.candidate_name {
            Some(name) => format!("Interview: {name}"),
            None => format!("Interview #{}", interview.id),
        };
        Self {
            id: interview.id,
            application_id: interview.application_id,
            title,
            start: interview.starts_at,
            end: interview.ends_at,
            status: interview.status,
            color: calendar_color(interview.status),
            editable: !interview.status.is_closed() && interview.starts_at > now,
        }
    }
}

/// Events overlapping `[from, to)`, sorted by start. Upstream may ignore the
/// window parameters, so the filter is applied here as well.
pub fn events_in_window(
    interviews: &[Interview],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = interviews
        .iter()
        .filter(|i| from.map_or(true, |from| i.ends_at > from))
        .filter(|i| to.map_or(true, |to| i.starts_at < to))
        .map(|i| CalendarEvent::from_interview(i, now))
        .collect();
    events.sort_by_key(|e| (e.start, e.id));
    events
}

fn check_window(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), ScheduleError> {
    if start <= now {
        return Err(ScheduleError::StartInPast);
    }
    if end <= start {
        return Err(ScheduleError::EndBeforeStart);
    }
    if end - start > Duration::hours(MAX_DURATION_HOURS) {
        return Err(ScheduleError::TooLong);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRequest {
    pub application_id: u64,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interviewer: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

fn end_after(start: DateTime<Utc>, duration: Duration) -> Result<DateTime<Utc>, ScheduleError> {
    start
        .checked_add_signed(duration)
        .ok_or(ScheduleError::OutOfRange)
}

pub fn plan_new_interview(req: ScheduleRequest, now: DateTime<Utc>) -> Result<NewInterview, ScheduleError> {
    let end = match req.end {
        Some(end) => end,
        None => end_after(req.start, Duration::minutes(DEFAULT_DURATION_MINUTES))?,
    };
    check_window(req.start, end, now)?;
    Ok(NewInterview {
        application_id: req.application_id,
        scheduled_at: req.start,
        end_time: end,
        interviewer: req.interviewer.filter(|s| !s.trim().is_empty()),
        location: req.location.filter(|s| !s.trim().is_empty()),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleRequest {
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

/// Validates a calendar drag/drop. Without an explicit end the original
/// duration is kept.
pub fn plan_reschedule(
    interview: &Interview,
    req: &RescheduleRequest,
    now: DateTime<Utc>,
) -> Result<ReschedulePatch, ScheduleError> {
    if interview.status.is_closed() {
        return Err(ScheduleError::Closed(interview.status));
    }
    let end = match req.end {
        Some(end) => end,
        None => end_after(req.start, interview.duration())?,
    };
    check_window(req.start, end, now)?;
    Ok(ReschedulePatch {
        scheduled_at: req.start,
        end_time: end,
        status: InterviewStatus::Rescheduled,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteDraft {
    pub content: String,
    #[serde(default)]
    pub rating: Option<i64>,
}

impl NoteDraft {
    pub fn validate(self) -> Result<NewInterviewNote, ScheduleError> {
        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err(ScheduleError::EmptyNote);
        }
        if content.chars().count() > MAX_NOTE_CHARS {
            return Err(ScheduleError::NoteTooLong);
        }
        let rating = match self.rating {
            None => None,
            Some(r @ 1..=5) => Some(r as u8),
            Some(_) => return Err(ScheduleError::RatingOutOfRange),
        };
        Ok(NewInterviewNote { content, rating })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 20, h, m, 0).unwrap()
    }

    fn interview(status: InterviewStatus) -> Interview {
        Interview {
            id: 1,
            application_id: 10,
            candidate_name: Some("Rosa Park".into()),
            interviewer: None,
            starts_at: at(14, 0),
            ends_at: at(14, 45),
            status,
            location: None,
        }
    }

    #[test]
    fn test_reschedule_keeps_duration() {
        let now = at(9, 0);
        let req = RescheduleRequest { start: at(16, 0), end: None };
        let patch = plan_reschedule(&interview(InterviewStatus::Scheduled), &req, now).unwrap();
        assert_eq!(patch.end_time, at(16, 45));
        assert_eq!(patch.status, InterviewStatus::Rescheduled);
    }

    #[test]
    fn test_reschedule_into_past_rejected() {
        let now = at(15, 0);
        let req = RescheduleRequest { start: at(14, 30), end: None };
        assert_eq!(
            plan_reschedule(&interview(InterviewStatus::Confirmed), &req, now),
            Err(ScheduleError::StartInPast)
        );
    }

    #[test]
    fn test_start_at_end_of_time_is_rejected() {
        let start = DateTime::<Utc>::MAX_UTC - Duration::minutes(10);
        let req = RescheduleRequest { start, end: None };
        assert_eq!(
            plan_reschedule(&interview(InterviewStatus::Scheduled), &req, at(9, 0)),
            Err(ScheduleError::OutOfRange)
        );

        let req = ScheduleRequest {
            application_id: 3,
            start,
            end: None,
            interviewer: None,
            location: None,
        };
        assert_eq!(
            plan_new_interview(req, at(9, 0)).map(|_| ()),
            Err(ScheduleError::OutOfRange)
        );
    }

    #[test]
    fn test_closed_interviews_cannot_move() {
        let req = RescheduleRequest { start: at(16, 0), end: None };
        assert_eq!(
            plan_reschedule(&interview(InterviewStatus::Completed), &req, at(9, 0)),
            Err(ScheduleError::Closed(InterviewStatus::Completed))
        );
    }

    #[test]
    fn test_new_interview_defaults_to_one_hour() {
        let req = ScheduleRequest {
            application_id: 3,
            start: at(10, 0),
            end: None,
            interviewer: Some("  ".into()),
            location: Some("Room 4".into()),
        };
        let planned = plan_new_interview(req, at(9, 0)).unwrap();
        assert_eq!(planned.end_time, at(11, 0));
        assert!(planned.interviewer.is_none());
    }

    #[test]
    fn test_overlong_and_inverted_windows_rejected() {
        let base = ScheduleRequest {
            application_id: 3,
            start: at(10, 0),
            end: Some(at(9, 30)),
            interviewer: None,
            location: None,
        };
        assert_eq!(
            plan_new_interview(base.clone(), at(8, 0)),
            Err(ScheduleError::EndBeforeStart)
        );
        let long = ScheduleRequest {
            end: Some(at(10, 0) + Duration::hours(9)),
            ..base
        };
        assert_eq!(plan_new_interview(long, at(8, 0)), Err(ScheduleError::TooLong));
    }

    #[test]
    fn test_window_filter_and_colors() {
        let mut later = interview(InterviewStatus::Cancelled);
        later.id = 2;
        later.starts_at = at(18, 0);
        later.ends_at = at(19, 0);
        let interviews = vec![later, interview(InterviewStatus::Scheduled)];

        let events = events_in_window(&interviews, Some(at(13, 0)), Some(at(17, 0)), at(9, 0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, 1);
        assert_eq!(events[0].color, "#3b82f6");
        assert!(events[0].editable);

        let all = events_in_window(&interviews, None, None, at(9, 0));
        assert_eq!(all.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(!all[1].editable);
    }

    #[test]
    fn test_note_validation() {
        let ok = NoteDraft { content: "  Clear communicator ".into(), rating: Some(4) }
            .validate()
            .unwrap();
        assert_eq!(ok.content, "Clear communicator");
        assert_eq!(ok.rating, Some(4));

        assert_eq!(
            NoteDraft { content: " ".into(), rating: None }.validate(),
            Err(ScheduleError::EmptyNote)
        );
        assert_eq!(
            NoteDraft { content: "ok".into(), rating: Some(0) }.validate(),
            Err(ScheduleError::RatingOutOfRange)
        );
    }
}
