use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use super::Upstream;
use crate::errors::AppError;
use crate::models::interview::InterviewNote;
use crate::scheduling::{
    events_in_window, plan_new_interview, plan_reschedule, CalendarEvent, NoteDraft,
    RescheduleRequest, ScheduleRequest,
};

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

/// GET /api/v1/interviews
pub async fn handle_calendar(
    Upstream(client): Upstream,
    Query(window): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    if let (Some(from), Some(to)) = (window.from, window.to) {
        if from >= to {
            return Err(AppError::Validation("'from' must be before 'to'".to_string()));
        }
    }
    let interviews = client.list_interviews(window.from, window.to).await?;
    Ok(Json(events_in_window(
        &interviews,
        window.from,
        window.to,
        Utc::now(),
    )))
}

/// POST /api/v1/interviews
pub async fn handle_schedule(
    Upstream(client): Upstream,
    Json(req): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<CalendarEvent>), AppError> {
    let now = Utc::now();
    let planned = plan_new_interview(req, now)?;
    let interview = client.create_interview(&planned).await?;
    info!(
        "Scheduled interview {} for application {} at {}",
        interview.id, interview.application_id, interview.starts_at
    );
    Ok((
        StatusCode::CREATED,
        Json(CalendarEvent::from_interview(&interview, now)),
    ))
}

/// PATCH /api/v1/interviews/:id/reschedule
pub async fn handle_reschedule(
    Upstream(client): Upstream,
    Path(id): Path<u64>,
    Json(req): Json<RescheduleRequest>,
) -> Result<Json<CalendarEvent>, AppError> {
    let now = Utc::now();
    let interview = client.get_interview(id).await?;
    let patch = plan_reschedule(&interview, &req, now)?;
    let moved = client.reschedule_interview(id, &patch).await?;
    info!("Rescheduled interview {id} to {}", moved.starts_at);
    Ok(Json(CalendarEvent::from_interview(&moved, now)))
}

/// GET /api/v1/interviews/:id/notes
pub async fn handle_list_notes(
    Upstream(client): Upstream,
    Path(id): Path<u64>,
) -> Result<Json<Vec<InterviewNote>>, AppError> {
    Ok(Json(client.list_interview_notes(id).await?))
}

/// POST /api/v1/interviews/:id/notes
pub async fn handle_add_note(
    Upstream(client): Upstream,
    Path(id): Path<u64>,
    Json(draft): Json<NoteDraft>,
) -> Result<(StatusCode, Json<InterviewNote>), AppError> {
    let note = draft.validate()?;
    let saved = client.add_interview_note(id, &note).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}
