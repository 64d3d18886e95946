use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Upstream;
use crate::bulk::{run_batch, BulkReport, BulkRequest, ConfirmedBatch};
use crate::errors::AppError;
use crate::lifecycle::{ApplicationStatusUpdater, ConfirmOutcome, ControlView, StatusTransitionControl};
use crate::models::application::{Application, ApplicationPatch};
use crate::offers::OfferDraft;
use crate::recruitment_client::RecruitmentClient;
use crate::state::AppState;
use crate::status::{is_allowed, ApplicationStatus, StatusBadge};

#[derive(Serialize)]
pub struct ApplicationDetail {
    pub application: Application,
    pub badge: StatusBadge,
    pub control: ControlView,
}

impl ApplicationDetail {
    fn new(application: Application, control: ControlView) -> Self {
        Self {
            badge: application.status.badge(),
            application,
            control,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

#[derive(Serialize)]
pub struct StatusChangeResponse {
    /// False when the requested status equalled the current one.
    pub changed: bool,
    #[serde(flatten)]
    pub detail: ApplicationDetail,
}

fn control_for(
    client: &RecruitmentClient,
    application: &Application,
) -> StatusTransitionControl<ApplicationStatusUpdater> {
    StatusTransitionControl::new(
        application.status,
        ApplicationStatusUpdater::new(client.clone(), application.id),
    )
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    Upstream(client): Upstream,
    Path(id): Path<u64>,
) -> Result<Json<ApplicationDetail>, AppError> {
    let application = client.get_application(id).await?;
    let view = control_for(&client, &application).view();
    Ok(Json(ApplicationDetail::new(application, view)))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_change_status(
    Upstream(client): Upstream,
    Path(id): Path<u64>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<StatusChangeResponse>, AppError> {
    let target = ApplicationStatus::from_wire(req.status.trim())
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let application = client.get_application(id).await?;
    let control = control_for(&client, &application);
    control.select(target)?;

    match control.confirm().await {
        ConfirmOutcome::Applied(_) => {
            let refreshed = client.get_application(id).await?;
            control.refresh(refreshed.status);
            Ok(Json(StatusChangeResponse {
                changed: true,
                detail: ApplicationDetail::new(refreshed, control.view()),
            }))
        }
        ConfirmOutcome::Unchanged => Ok(Json(StatusChangeResponse {
            changed: false,
            detail: ApplicationDetail::new(application, control.view()),
        })),
        ConfirmOutcome::Failed(e) => Err(e),
        ConfirmOutcome::NothingSelected | ConfirmOutcome::InFlight => Err(AppError::Conflict(
            format!("application {id} is already being updated"),
        )),
    }
}

/// POST /api/v1/applications/:id/offer
pub async fn handle_extend_offer(
    Upstream(client): Upstream,
    Path(id): Path<u64>,
    Json(draft): Json<OfferDraft>,
) -> Result<Json<ApplicationDetail>, AppError> {
    let terms = draft.validate(Utc::now().date_naive())?;

    let application = client.get_application(id).await?;
    if !is_allowed(application.status, ApplicationStatus::Offer) {
        return Err(AppError::InvalidTransition {
            from: application.status,
            to: ApplicationStatus::Offer,
        });
    }

    let updated = client
        .update_application(id, &ApplicationPatch::offer(&terms))
        .await?;
    tracing::info!(
        "Offer extended on application {id}: {} {}",
        terms.salary,
        terms.currency
    );
    let view = control_for(&client, &updated).view();
    Ok(Json(ApplicationDetail::new(updated, view)))
}

/// POST /api/v1/applications/bulk
pub async fn handle_bulk(
    State(state): State<AppState>,
    Upstream(client): Upstream,
    Json(req): Json<BulkRequest>,
) -> Result<Json<BulkReport>, AppError> {
    let batch = ConfirmedBatch::try_from(req)?;
    Ok(Json(
        run_batch(&client, batch, state.config.bulk_concurrency).await,
    ))
}
