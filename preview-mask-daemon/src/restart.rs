//! Notification daemon restart dispatch.
//!
//! `usernoted` only re-reads `com.apple.ncprefs.plist` on launch. Killing it
//! lets launchd start a fresh instance that sees the new value. The request is
//! fire-and-forget: the child is spawned and never waited on.

use std::process::{Command, Stdio};

use crate::error::{spawn_err, DaemonError};

pub const NOTIFICATION_DAEMON: &str = "usernoted";
pub const KILLALL: &str = "killall";

/// Whether the restart request left this process.
///
/// Says nothing about whether the daemon actually relaunched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Dispatched { pid: u32 },
    Failed { reason: String },
    Skipped,
}

/// Something that can ask the notification daemon to restart.
pub trait DaemonRestarter {
    fn restart(&self) -> DispatchOutcome;
}

/// Restarts a daemon by name with `killall <name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Killall {
    program: String,
    process: String,
}

impl Killall {
    pub fn new(process: impl Into<String>) -> Self {
        Self {
            program: KILLALL.to_string(),
            process: process.into(),
        }
    }

    /// Use a different executable in place of `killall`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn process(&self) -> &str {
        &self.process
    }

    fn spawn(&self) -> Result<u32, DaemonError> {
        let child = Command::new(&self.program)
            .arg(&self.process)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_err(&self.program, e))?;
        Ok(child.id())
    }
}

impl Default for Killall {
    fn default() -> Self {
        Self::new(NOTIFICATION_DAEMON)
    }
}

impl DaemonRestarter for Killall {
    fn restart(&self) -> DispatchOutcome {
        match self.spawn() {
            Ok(pid) => {
                tracing::debug!("dispatched `{} {}` (pid {pid})", self.program, self.process);
                DispatchOutcome::Dispatched { pid }
            }
            Err(err) => {
                tracing::warn!("could not restart {}: {err}", self.process);
                DispatchOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// Restarter that never dispatches anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoRestart;

impl DaemonRestarter for NoRestart {
    fn restart(&self) -> DispatchOutcome {
        tracing::debug!("daemon restart skipped");
        DispatchOutcome::Skipped
    }
}
