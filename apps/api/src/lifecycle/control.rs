//! Status Transition Control.
//!
//! Holds the current status of one application, offers only the successors
//! from the transition table, and forwards a confirmed choice to a
//! [`StatusUpdater`]. At most one update is in flight per control. After a
//! successful update the selection is cleared but `current` is left alone:
//! callers refetch and call [`StatusTransitionControl::refresh`] with the
//! authoritative value.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use super::updater::StatusUpdater;
use crate::errors::AppError;
use crate::status::{is_allowed, is_terminal, next_statuses, ApplicationStatus, StatusBadge};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("application is {from}; no further status changes are offered")]
    Locked { from: ApplicationStatus },

    #[error("{to} is not offered from {from}")]
    NotOffered {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("a status update is already in progress")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusOption {
    pub status: ApplicationStatus,
    pub badge: StatusBadge,
}

impl From<ApplicationStatus> for StatusOption {
    fn from(status: ApplicationStatus) -> Self {
        Self {
            status,
            badge: status.badge(),
        }
    }
}

/// What a client should render for the control.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ControlView {
    Selector {
        current: StatusOption,
        options: Vec<StatusOption>,
        selected: Option<ApplicationStatus>,
        busy: bool,
        last_error: Option<String>,
    },
    Locked {
        current: StatusOption,
        message: String,
    },
}

#[derive(Debug)]
pub enum ConfirmOutcome {
    /// The updater accepted the new status.
    Applied(ApplicationStatus),
    /// The selection equalled the current status; nothing was sent.
    Unchanged,
    NothingSelected,
    /// Another confirm is still awaiting the updater; nothing was sent.
    InFlight,
    /// The updater failed. The selection is kept so the caller can retry.
    Failed(AppError),
}

#[derive(Debug)]
struct ControlState {
    current: ApplicationStatus,
    selected: Option<ApplicationStatus>,
    busy: bool,
    last_error: Option<String>,
}

pub struct StatusTransitionControl<U> {
    updater: U,
    state: Mutex<ControlState>,
}

/// Clears the busy flag if the confirm future is dropped mid-update. A
/// completed update disarms it and resets the flag together with its outcome.
struct BusyGuard<'a> {
    state: &'a Mutex<ControlState>,
    armed: bool,
}

impl<'a> BusyGuard<'a> {
    fn arm(state: &'a Mutex<ControlState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .busy = false;
        }
    }
}

impl<U: StatusUpdater> StatusTransitionControl<U> {
    pub fn new(current: ApplicationStatus, updater: U) -> Self {
        Self {
            updater,
            state: Mutex::new(ControlState {
                current,
                selected: None,
                busy: false,
                last_error: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stages `status` for the next confirm. Picking the current status is
    /// accepted even on a final status and later confirms as a no-op.
    pub fn select(&self, status: ApplicationStatus) -> Result<(), SelectionError> {
        let mut state = self.lock();
        if state.busy {
            return Err(SelectionError::Busy);
        }
        if status != state.current {
            if is_terminal(state.current) {
                return Err(SelectionError::Locked {
                    from: state.current,
                });
            }
            if !is_allowed(state.current, status) {
                return Err(SelectionError::NotOffered {
                    from: state.current,
                    to: status,
                });
            }
        }
        state.selected = Some(status);
        Ok(())
    }

    /// Adopts the authoritative status after a refetch.
    pub fn refresh(&self, authoritative: ApplicationStatus) {
        let mut state = self.lock();
        state.current = authoritative;
        state.selected = None;
        state.last_error = None;
    }

    pub async fn confirm(&self) -> ConfirmOutcome {
        let (from, target) = {
            let mut state = self.lock();
            if state.busy {
                return ConfirmOutcome::InFlight;
            }
            let selected = state.selected;
            match selected {
                None => return ConfirmOutcome::NothingSelected,
                Some(selected) if selected == state.current => {
                    state.selected = None;
                    return ConfirmOutcome::Unchanged;
                }
                Some(selected) => {
                    state.busy = true;
                    (state.current, selected)
                }
            }
        };

        let guard = BusyGuard::arm(&self.state);
        let result = self.updater.update_status(target).await;

        let mut state = self.lock();
        guard.disarm();
        state.busy = false;
        match result {
            Ok(()) => {
                info!("Application status change {} -> {} accepted", from, target);
                state.selected = None;
                state.last_error = None;
                ConfirmOutcome::Applied(target)
            }
            Err(e) => {
                error!("Application status change {} -> {} failed: {}", from, target, e);
                state.last_error = Some(e.to_string());
                ConfirmOutcome::Failed(e)
            }
        }
    }

    pub fn view(&self) -> ControlView {
        let state = self.lock();
        let current = StatusOption::from(state.current);
        let options = next_statuses(state.current);

        if options.is_empty() {
            return ControlView::Locked {
                message: format!(
                    "{} is a final status; no further changes are available.",
                    current.badge.label
                ),
                current,
            };
        }

        ControlView::Selector {
            current,
            options: options.iter().copied().map(StatusOption::from).collect(),
            selected: state.selected,
            busy: state.busy,
            last_error: state.last_error.clone(),
        }
    }
}

#[cfg(test)]
impl<U: StatusUpdater> StatusTransitionControl<U> {
    fn options(&self) -> &'static [ApplicationStatus] {
        next_statuses(self.lock().current)
    }

    fn selected(&self) -> Option<ApplicationStatus> {
        self.lock().selected
    }

    fn is_busy(&self) -> bool {
        self.lock().busy
    }
}
