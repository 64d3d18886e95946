//! Application status lifecycle: offers only the legal next statuses for an
//! application and forwards the chosen one to an updater.

pub mod control;
pub mod updater;

pub use control::{ConfirmOutcome, ControlView, SelectionError, StatusOption, StatusTransitionControl};
pub use updater::{ApplicationStatusUpdater, StatusUpdater};
