//! preview-mask core library — preview modes, the ncprefs document model,
//! file-backed store, errors.
//!
//! - [`types`] — [`NotificationPreviewMode`], [`Target`] and result structs
//! - [`document`] — [`PreferencesDocument`], the parsed plist
//! - [`store`] — [`PrefsStore`]: read / write / list against one file
//! - [`error`] — [`PrefsError`]

pub mod document;
pub mod error;
pub mod store;
pub mod types;

pub use document::PreferencesDocument;
pub use error::PrefsError;
pub use store::{prefs_path, prefs_path_at, PrefsStore};
pub use types::{
    AppEntry, BundleId, ModeReading, NotificationPreviewMode, Target, WriteOutcome,
};
