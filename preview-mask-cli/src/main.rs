//! preview-mask — toggle macOS notification previews.
//!
//! # Usage
//!
//! ```text
//! preview-mask set <MODE> [--bundle-id <ID>] [--verbose] [--no-restart]
//! preview-mask get [--bundle-id <ID>] [--json]
//! preview-mask apps [--json]
//!
//! MODE: always | when-unlocked | never | default | 0-3
//! --prefs <PATH> / PREVIEW_MASK_PREFS override the preferences file.
//! ```

mod commands;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{apps::AppsArgs, get::GetArgs, set::SetArgs};
use preview_mask_core::{NotificationPreviewMode, PrefsStore};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "preview-mask",
    version,
    about = "Toggle macOS notification previews globally or per app",
    long_about = None,
)]
struct Cli {
    /// Preferences plist to edit [default: ~/Library/Preferences/com.apple.ncprefs.plist].
    #[arg(long, global = true, env = "PREVIEW_MASK_PREFS", value_name = "PATH")]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set the preview mode and restart the notification daemon.
    Set(SetArgs),

    /// Print the current preview mode.
    Get(GetArgs),

    /// List per-app entries and their preview modes.
    Apps(AppsArgs),
}

// ---------------------------------------------------------------------------
// Shared mode argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse a mode from either its name or its value.
#[derive(Debug, Clone, Copy)]
pub struct ModeArg(pub NotificationPreviewMode);

impl FromStr for ModeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mode = match s.trim().parse::<i64>() {
            Ok(value) => NotificationPreviewMode::try_from(value),
            Err(_) => s.trim().parse::<NotificationPreviewMode>(),
        };
        mode.map(Self).map_err(|e| e.to_string())
    }
}

impl fmt::Display for ModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ModeArg> for NotificationPreviewMode {
    fn from(m: ModeArg) -> Self {
        m.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let store = resolve_store(cli.prefs)?;
    match cli.command {
        Commands::Set(args) => args.run(&store),
        Commands::Get(args) => args.run(&store),
        Commands::Apps(args) => args.run(&store),
    }
}

fn resolve_store(prefs: Option<PathBuf>) -> Result<PrefsStore> {
    match prefs {
        Some(path) => Ok(PrefsStore::new(path)),
        None => PrefsStore::discover().context("could not locate notification preferences"),
    }
}

/// Logs go to stderr so stdout stays scriptable; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
