//! `preview-mask set` — change the preview mode and restart usernoted.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use preview_mask_core::{PrefsStore, Target, WriteOutcome};
use preview_mask_daemon::{
    apply_preview_mode, ApplyRequest, DaemonRestarter, Killall, NoRestart,
};

use crate::ModeArg;

/// Arguments for `preview-mask set`.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Preview mode: always | when-unlocked | never | default (or 0-3).
    pub mode: ModeArg,

    /// Only change the entry for this application bundle id.
    #[arg(long, short = 'b', value_name = "BUNDLE_ID")]
    pub bundle_id: Option<String>,

    /// Print the mode before and after the change.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Write the preferences but do not restart usernoted.
    #[arg(long)]
    pub no_restart: bool,
}

impl SetArgs {
    pub fn run(self, store: &PrefsStore) -> Result<()> {
        let request = ApplyRequest {
            mode: self.mode.into(),
            target: Target::from_bundle(self.bundle_id),
            verbose: self.verbose,
        };
        let restarter: Box<dyn DaemonRestarter> = if self.no_restart {
            Box::new(NoRestart)
        } else {
            Box::new(Killall::default())
        };

        let report = apply_preview_mode(store, restarter.as_ref(), &request, |_, reading| {
            println!("NotificationPreviewMode: {}", reading.mode);
        })
        .with_context(|| {
            format!(
                "failed to set {} for {} in {}",
                request.mode,
                request.target,
                store.path().display()
            )
        })?;

        if !request.verbose {
            match report.write {
                WriteOutcome::Written { previous, current } => {
                    println!("{} {}: {previous} → {current}", "✓".green(), request.target)
                }
                WriteOutcome::Unchanged { mode } => {
                    println!("{} {} already {mode}", "·".bright_black(), request.target)
                }
            }
        }
        Ok(())
    }
}
