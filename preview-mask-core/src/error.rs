//! Error types for preview-mask-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from preferences store operations.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// The file could not be read or replaced (missing, permission denied, disk error).
    #[error("cannot access preferences store at {path}: {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes on disk are not a property list.
    #[error("malformed preferences document at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },

    /// The property list parsed but does not have the expected shape.
    #[error("malformed preferences document at {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// Binary plist encoding of the mutated document failed.
    #[error("failed to encode preferences document: {0}")]
    Encode(#[source] plist::Error),

    /// No `apps` entry carries the requested `bundle-id`.
    #[error("bundle '{bundle_id}' not found in preferences")]
    BundleNotFound { bundle_id: String },

    #[error("unknown notification preview mode value {0}; expected 0-3")]
    UnknownModeValue(i64),

    #[error(
        "unknown notification preview mode '{0}'; expected: always, when-unlocked, never, default"
    )]
    UnknownModeName(String),

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or pass --prefs")]
    HomeNotFound,
}

/// Convenience constructor for [`PrefsError::Access`].
pub(crate) fn access_err(path: impl Into<PathBuf>, source: std::io::Error) -> PrefsError {
    PrefsError::Access {
        path: path.into(),
        source,
    }
}

pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> PrefsError {
    PrefsError::Malformed {
        path: path.into(),
        reason: reason.into(),
    }
}
