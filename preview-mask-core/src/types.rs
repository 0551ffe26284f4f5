//! Domain types for the notification preferences store.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PrefsError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Reverse-DNS application identifier, e.g. `com.kakao.KakaoTalkMac`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BundleId(pub String);

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for BundleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BundleId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Preview mode
// ---------------------------------------------------------------------------

/// How much notification content macOS reveals on the lock screen.
///
/// Stored in the preferences file as the integer `content_visibility`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NotificationPreviewMode {
    Default = 0,
    Never = 1,
    WhenUnlocked = 2,
    Always = 3,
}

impl NotificationPreviewMode {
    /// All modes, in storage-value order.
    pub fn all() -> &'static [NotificationPreviewMode] {
        &[
            NotificationPreviewMode::Default,
            NotificationPreviewMode::Never,
            NotificationPreviewMode::WhenUnlocked,
            NotificationPreviewMode::Always,
        ]
    }

    /// Integer written to `content_visibility`.
    pub fn value(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            NotificationPreviewMode::Default => "Default",
            NotificationPreviewMode::Never => "Never",
            NotificationPreviewMode::WhenUnlocked => "WhenUnlocked",
            NotificationPreviewMode::Always => "Always",
        }
    }
}

impl fmt::Display for NotificationPreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i64> for NotificationPreviewMode {
    type Error = PrefsError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NotificationPreviewMode::Default),
            1 => Ok(NotificationPreviewMode::Never),
            2 => Ok(NotificationPreviewMode::WhenUnlocked),
            3 => Ok(NotificationPreviewMode::Always),
            other => Err(PrefsError::UnknownModeValue(other)),
        }
    }
}

/// Name lookup. Case-insensitive; `-` and `_` are ignored so that
/// `when-unlocked`, `when_unlocked` and `WhenUnlocked` all resolve.
impl FromStr for NotificationPreviewMode {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "default" => Ok(NotificationPreviewMode::Default),
            "never" => Ok(NotificationPreviewMode::Never),
            "whenunlocked" => Ok(NotificationPreviewMode::WhenUnlocked),
            "always" => Ok(NotificationPreviewMode::Always),
            _ => Err(PrefsError::UnknownModeName(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Targets and results
// ---------------------------------------------------------------------------

/// Which `content_visibility` value an operation addresses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    /// The top-level default applied to every app without its own setting.
    #[default]
    Global,
    /// The first `apps` entry whose `bundle-id` matches.
    Bundle(BundleId),
}

impl Target {
    /// `Some(id)` selects a bundle, `None` the global default.
    pub fn from_bundle(bundle_id: Option<String>) -> Self {
        match bundle_id {
            Some(id) => Target::Bundle(BundleId::from(id)),
            None => Target::Global,
        }
    }

    pub fn bundle_id(&self) -> Option<&BundleId> {
        match self {
            Target::Global => None,
            Target::Bundle(id) => Some(id),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Global => f.write_str("global default"),
            Target::Bundle(id) => write!(f, "bundle '{id}'"),
        }
    }
}

/// Result of reading one `content_visibility` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeReading {
    pub mode: NotificationPreviewMode,
    /// Position in `apps`; `None` for the global default.
    pub bundle_index: Option<usize>,
}

/// One entry of the `apps` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppEntry {
    pub index: usize,
    pub bundle_id: BundleId,
    pub mode: NotificationPreviewMode,
}

/// Outcome of a mode write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was rewritten with the new value.
    Written {
        previous: NotificationPreviewMode,
        current: NotificationPreviewMode,
    },
    /// The stored value already matched; the file was left untouched.
    Unchanged { mode: NotificationPreviewMode },
}

impl WriteOutcome {
    /// Mode stored after the write.
    pub fn mode(&self) -> NotificationPreviewMode {
        match self {
            WriteOutcome::Written { current, .. } => *current,
            WriteOutcome::Unchanged { mode } => *mode,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
