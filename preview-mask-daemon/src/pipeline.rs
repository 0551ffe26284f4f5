//! Apply pipeline: report → write → restart → report.
//!
//! Shared by `preview-mask set` and anything else that needs the full
//! change-and-restart sequence. Each step finishes before the next starts; the
//! restart is only dispatched, never awaited, so the "after" reading reflects
//! the file as written regardless of the daemon's state.

use preview_mask_core::{ModeReading, NotificationPreviewMode, PrefsStore, Target, WriteOutcome};

use crate::error::DaemonError;
use crate::restart::{DaemonRestarter, DispatchOutcome};

/// When a verbose reading was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStage {
    /// Before anything was written.
    Before,
    /// After the write and the restart dispatch.
    After,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    pub mode: NotificationPreviewMode,
    pub target: Target,
    /// Take and report a reading before and after the change.
    pub verbose: bool,
}

/// Everything that happened during one [`apply_preview_mode`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub before: Option<ModeReading>,
    pub write: WriteOutcome,
    pub restart: DispatchOutcome,
    pub after: Option<ModeReading>,
}

/// Set `request.mode` on `request.target`, then restart the daemon.
///
/// Verbose readings are handed to `observe` as soon as they are taken, so a
/// "before" reading is reported even if the write then fails. A failed restart
/// dispatch is recorded in the report, not returned as an error.
pub fn apply_preview_mode<R, F>(
    store: &PrefsStore,
    restarter: &R,
    request: &ApplyRequest,
    mut observe: F,
) -> Result<ApplyReport, DaemonError>
where
    R: DaemonRestarter + ?Sized,
    F: FnMut(ApplyStage, &ModeReading),
{
    let before = if request.verbose {
        let reading = store.read_mode(&request.target)?;
        observe(ApplyStage::Before, &reading);
        Some(reading)
    } else {
        None
    };

    let write = store.write_mode(request.mode, &request.target)?;
    let restart = restarter.restart();

    let after = if request.verbose {
        let reading = store.read_mode(&request.target)?;
        observe(ApplyStage::After, &reading);
        Some(reading)
    } else {
        None
    };

    Ok(ApplyReport {
        before,
        write,
        restart,
        after,
    })
}
