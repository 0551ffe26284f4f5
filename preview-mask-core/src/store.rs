//! File-backed access to the notification preferences plist.
//!
//! # Location
//!
//! ```text
//! ~/Library/Preferences/com.apple.ncprefs.plist
//! ```
//!
//! # API pattern
//!
//! Path helpers come in two forms:
//! - `fn_at(home: &Path)` — explicit home; used in tests with `TempDir`
//! - `fn()` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Every [`PrefsStore`] operation re-reads the file; nothing is cached between calls.

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::PreferencesDocument;
use crate::error::{access_err, PrefsError};
use crate::types::{AppEntry, ModeReading, NotificationPreviewMode, Target, WriteOutcome};

pub const NCPREFS_FILE: &str = "com.apple.ncprefs.plist";

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/Library/Preferences/com.apple.ncprefs.plist` — pure, no I/O.
pub fn prefs_path_at(home: &Path) -> PathBuf {
    home.join("Library").join("Preferences").join(NCPREFS_FILE)
}

/// `prefs_path_at` convenience wrapper.
pub fn prefs_path() -> Result<PathBuf, PrefsError> {
    Ok(prefs_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Store
// ---------------------------------------------------------------------------

/// Reads and rewrites one preferences file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for the preferences file under an explicit home directory.
    pub fn at_home(home: &Path) -> Self {
        Self::new(prefs_path_at(home))
    }

    /// Store for the current user's preferences file.
    pub fn discover() -> Result<Self, PrefsError> {
        Ok(Self::new(prefs_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file from disk.
    pub fn load(&self) -> Result<PreferencesDocument, PrefsError> {
        let bytes = fs::read(&self.path).map_err(|e| access_err(&self.path, e))?;
        tracing::debug!("loaded {} bytes from {}", bytes.len(), self.path.display());
        PreferencesDocument::from_bytes(&self.path, &bytes)
    }

    /// Current mode for `target`. Read-only.
    pub fn read_mode(&self, target: &Target) -> Result<ModeReading, PrefsError> {
        self.load()?.read_mode(target)
    }

    /// Set `target` to `mode` and replace the file with the binary encoding.
    ///
    /// The document is re-read from disk, so this is independent of any
    /// earlier [`read_mode`](Self::read_mode). If the stored value already
    /// equals `mode` the file is not touched.
    pub fn write_mode(
        &self,
        mode: NotificationPreviewMode,
        target: &Target,
    ) -> Result<WriteOutcome, PrefsError> {
        let mut document = self.load()?;
        let previous = document.set_mode(target, mode)?;
        if previous.mode == mode {
            tracing::debug!("unchanged: {target} already {mode}");
            return Ok(WriteOutcome::Unchanged { mode });
        }

        let bytes = document.into_binary()?;
        self.replace(&bytes)?;

        tracing::info!(
            "wrote {}: {target} {} -> {mode}",
            self.path.display(),
            previous.mode
        );
        Ok(WriteOutcome::Written {
            previous: previous.mode,
            current: mode,
        })
    }

    /// Every bundle entry in the file, in file order.
    pub fn list_apps(&self) -> Result<Vec<AppEntry>, PrefsError> {
        self.load()?.app_entries()
    }

    /// Write flow: bytes → `<file>.preview-mask.tmp` → copy permissions → `rename`.
    /// The tmp file sits next to the target so the rename stays on one filesystem.
    fn replace(&self, bytes: &[u8]) -> Result<(), PrefsError> {
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, bytes).map_err(|e| access_err(&tmp, e))?;

        if let Ok(meta) = fs::metadata(&self.path) {
            if let Err(e) = fs::set_permissions(&tmp, meta.permissions()) {
                let _ = fs::remove_file(&tmp);
                return Err(access_err(&tmp, e));
            }
        }

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(access_err(&self.path, e));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn tmp_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.preview-mask.tmp", path.display()))
}

fn home() -> Result<PathBuf, PrefsError> {
    dirs::home_dir().ok_or(PrefsError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
