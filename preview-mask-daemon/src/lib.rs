//! Notification daemon restart and the apply pipeline built on it.

mod error;
pub mod pipeline;
pub mod restart;

pub use error::DaemonError;
pub use pipeline::{apply_preview_mode, ApplyReport, ApplyRequest, ApplyStage};
pub use restart::{DaemonRestarter, DispatchOutcome, Killall, NoRestart, NOTIFICATION_DAEMON};
