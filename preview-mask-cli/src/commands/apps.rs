//! `preview-mask apps` — list per-app preview settings.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use preview_mask_core::{AppEntry, PrefsStore};

/// Arguments for `preview-mask apps`.
#[derive(Args, Debug)]
pub struct AppsArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct AppJson {
    index: usize,
    bundle_id: String,
    mode: String,
    value: i64,
}

#[derive(Tabled)]
struct AppTableRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "bundle id")]
    bundle_id: String,
    #[tabled(rename = "preview")]
    mode: String,
}

impl AppsArgs {
    pub fn run(self, store: &PrefsStore) -> Result<()> {
        let apps = store
            .list_apps()
            .with_context(|| format!("failed to list apps in {}", store.path().display()))?;

        if self.json {
            let payload: Vec<AppJson> = apps
                .into_iter()
                .map(|app| AppJson {
                    index: app.index,
                    bundle_id: app.bundle_id.0,
                    mode: app.mode.to_string(),
                    value: app.mode.value(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to render apps JSON")?
            );
            return Ok(());
        }

        print_table(store, apps);
        Ok(())
    }
}

fn print_table(store: &PrefsStore, apps: Vec<AppEntry>) {
    if apps.is_empty() {
        println!("No app entries in {}.", store.path().display());
        return;
    }

    let rows: Vec<AppTableRow> = apps
        .into_iter()
        .map(|app| AppTableRow {
            index: app.index,
            bundle_id: app.bundle_id.0,
            mode: app.mode.to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
