//! `preview-mask get` — print the current preview mode.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use preview_mask_core::{PrefsStore, Target};

/// Arguments for `preview-mask get`.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Read the entry for this application bundle id instead of the global default.
    #[arg(long, short = 'b', value_name = "BUNDLE_ID")]
    pub bundle_id: Option<String>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ModeJson {
    bundle_id: Option<String>,
    bundle_index: Option<usize>,
    mode: String,
    value: i64,
}

impl GetArgs {
    pub fn run(self, store: &PrefsStore) -> Result<()> {
        let target = Target::from_bundle(self.bundle_id);
        let reading = store
            .read_mode(&target)
            .with_context(|| format!("failed to read {target} from {}", store.path().display()))?;

        if self.json {
            let payload = ModeJson {
                bundle_id: target.bundle_id().map(ToString::to_string),
                bundle_index: reading.bundle_index,
                mode: reading.mode.to_string(),
                value: reading.mode.value(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to render mode JSON")?
            );
            return Ok(());
        }

        println!("NotificationPreviewMode: {}", reading.mode);
        Ok(())
    }
}
