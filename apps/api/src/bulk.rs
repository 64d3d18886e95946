//! Batch status changes across many applications.
//!
//! Each item runs through its own transition control, at most `limit` at a
//! time, and every item reports its own outcome. One failure never hides the
//! others.

use std::future::Future;

use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::lifecycle::{ApplicationStatusUpdater, ConfirmOutcome, StatusTransitionControl};
use crate::recruitment_client::RecruitmentClient;
use crate::status::ApplicationStatus;

pub const DEFAULT_BULK_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Approve,
    Reject,
}

impl BulkAction {
    pub fn target(&self) -> ApplicationStatus {
        match self {
            BulkAction::Approve => ApplicationStatus::ScreeningPassed,
            BulkAction::Reject => ApplicationStatus::Rejected,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            BulkAction::Approve => "approve",
            BulkAction::Reject => "reject",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub action: BulkAction,
    pub application_ids: Vec<u64>,
    #[serde(default)]
    pub confirm: bool,
}

/// A batch the caller has explicitly confirmed. Ids are unique and sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedBatch {
    pub action: BulkAction,
    pub ids: Vec<u64>,
}

impl TryFrom<BulkRequest> for ConfirmedBatch {
    type Error = AppError;

    fn try_from(req: BulkRequest) -> Result<Self, Self::Error> {
        let mut ids = req.application_ids;
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            return Err(AppError::Validation("No applications selected".to_string()));
        }
        if !req.confirm {
            return Err(AppError::ConfirmationRequired(format!(
                "Set confirm=true to {} {} application(s)",
                req.action.verb(),
                ids.len()
            )));
        }

        Ok(ConfirmedBatch {
            action: req.action,
            ids,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkFailure {
    pub id: u64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkReport {
    pub action: BulkAction,
    pub target_status: ApplicationStatus,
    pub succeeded: Vec<u64>,
    /// Already at the target status; nothing was sent.
    pub unchanged: Vec<u64>,
    pub failed: Vec<BulkFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Applied,
    Unchanged,
}

/// Runs `op` for every id with at most `limit` futures in flight and returns
/// each id with its own result, in completion order.
pub async fn fan_out<T, F, Fut>(ids: Vec<u64>, limit: usize, op: F) -> Vec<(u64, Result<T, AppError>)>
where
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    stream::iter(ids)
        .map(|id| {
            let fut = op(id);
            async move { (id, fut.await) }
        })
        .buffer_unordered(limit.max(1))
        .collect()
        .await
}

/// Moves one application to `target` through the same control the single-item
/// endpoint uses, so the transition table applies to batches too.
pub async fn transition_one(
    client: &RecruitmentClient,
    id: u64,
    target: ApplicationStatus,
) -> Result<ItemOutcome, AppError> {
    let application = client.get_application(id).await?;
    let control = StatusTransitionControl::new(
        application.status,
        ApplicationStatusUpdater::new(client.clone(), id),
    );
    control.select(target)?;

    match control.confirm().await {
        ConfirmOutcome::Applied(_) => Ok(ItemOutcome::Applied),
        ConfirmOutcome::Unchanged => Ok(ItemOutcome::Unchanged),
        ConfirmOutcome::Failed(e) => Err(e),
        ConfirmOutcome::NothingSelected | ConfirmOutcome::InFlight => Err(AppError::Conflict(
            format!("application {id} could not be updated"),
        )),
    }
}

pub async fn run_batch(client: &RecruitmentClient, batch: ConfirmedBatch, limit: usize) -> BulkReport {
    let target = batch.action.target();
    info!(
        "Bulk {} of {} application(s), concurrency {}",
        batch.action.verb(),
        batch.ids.len(),
        limit
    );

    let results = fan_out(batch.ids, limit, |id| transition_one(client, id, target)).await;
    let report = BulkReport::collect(batch.action, results);

    if !report.failed.is_empty() {
        warn!(
            "Bulk {}: {} succeeded, {} failed",
            batch.action.verb(),
            report.succeeded.len(),
            report.failed.len()
        );
    }
    report
}

impl BulkReport {
    pub fn collect(action: BulkAction, mut results: Vec<(u64, Result<ItemOutcome, AppError>)>) -> Self {
        results.sort_by_key(|(id, _)| *id);

        let mut report = BulkReport {
            action,
            target_status: action.target(),
            succeeded: Vec::new(),
            unchanged: Vec::new(),
            failed: Vec::new(),
        };
        for (id, result) in results {
            match result {
                Ok(ItemOutcome::Applied) => report.succeeded.push(id),
                Ok(ItemOutcome::Unchanged) => report.unchanged.push(id),
                Err(e) => report.failed.push(BulkFailure {
                    id,
                    reason: e.to_string(),
                }),
            }
        }
        report
    }
}
