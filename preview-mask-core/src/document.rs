//! In-memory model of `com.apple.ncprefs.plist`.
//!
//! The document keeps the parsed [`plist::Dictionary`] as-is and only ever
//! touches one `content_visibility` integer, so key order, array order and
//! every unrelated value survive a rewrite.
//!
//! ```text
//! <dict>
//!   content_visibility   <integer>      global default
//!   apps                 <array>
//!     <dict>
//!       bundle-id            <string>
//!       content_visibility   <integer>
//!       ...
//! ```

use std::io::Cursor;
use std::path::{Path, PathBuf};

use plist::{Dictionary, Value};

use crate::error::{malformed, PrefsError};
use crate::types::{AppEntry, BundleId, ModeReading, NotificationPreviewMode, Target};

pub const APPS_KEY: &str = "apps";
pub const BUNDLE_ID_KEY: &str = "bundle-id";
pub const CONTENT_VISIBILITY_KEY: &str = "content_visibility";

/// Parsed preferences file, tagged with the path it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesDocument {
    path: PathBuf,
    root: Dictionary,
}

impl PreferencesDocument {
    /// Decode a binary (or XML) property list whose root must be a dictionary.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self, PrefsError> {
        let value = Value::from_reader(Cursor::new(bytes)).map_err(|source| PrefsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let root = value
            .into_dictionary()
            .ok_or_else(|| malformed(path, "root is not a dictionary"))?;
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    /// Encode the whole document as a binary property list.
    pub fn into_binary(self) -> Result<Vec<u8>, PrefsError> {
        let mut buf = Vec::new();
        Value::Dictionary(self.root)
            .to_writer_binary(&mut buf)
            .map_err(PrefsError::Encode)?;
        Ok(buf)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Dictionary {
        &self.root
    }

    /// Index of the first `apps` entry whose `bundle-id` equals `bundle_id`.
    ///
    /// A document without an `apps` key has no entries. Entries that are not
    /// dictionaries, or lack a string `bundle-id`, never match.
    pub fn find_app(&self, bundle_id: &BundleId) -> Result<Option<usize>, PrefsError> {
        let Some(apps) = self.apps()? else {
            return Ok(None);
        };
        Ok(apps.iter().position(|entry| {
            entry
                .as_dictionary()
                .and_then(|d| d.get(BUNDLE_ID_KEY))
                .and_then(Value::as_string)
                == Some(bundle_id.0.as_str())
        }))
    }

    /// Current mode for `target`.
    ///
    /// A missing `content_visibility` key reads as [`NotificationPreviewMode::Default`].
    pub fn read_mode(&self, target: &Target) -> Result<ModeReading, PrefsError> {
        match target {
            Target::Global => Ok(ModeReading {
                mode: self.mode_of(self.root.get(CONTENT_VISIBILITY_KEY), "content_visibility")?,
                bundle_index: None,
            }),
            Target::Bundle(bundle_id) => {
                let index = self.require_app(bundle_id)?;
                let entry = self.app_entry(index)?;
                Ok(ModeReading {
                    mode: self.mode_of(
                        entry.get(CONTENT_VISIBILITY_KEY),
                        &format!("apps[{index}].content_visibility"),
                    )?,
                    bundle_index: Some(index),
                })
            }
        }
    }

    /// Overwrite the `content_visibility` addressed by `target`.
    ///
    /// Returns the reading taken before the change. When the stored value
    /// already equals `mode` the document is left untouched.
    pub fn set_mode(
        &mut self,
        target: &Target,
        mode: NotificationPreviewMode,
    ) -> Result<ModeReading, PrefsError> {
        let previous = self.read_mode(target)?;
        if previous.mode == mode {
            return Ok(previous);
        }

        let value = Value::Integer(mode.value().into());
        match previous.bundle_index {
            None => {
                self.root.insert(CONTENT_VISIBILITY_KEY.to_string(), value);
            }
            Some(index) => {
                let entry = self
                    .root
                    .get_mut(APPS_KEY)
                    .and_then(Value::as_array_mut)
                    .and_then(|apps| apps.get_mut(index))
                    .and_then(Value::as_dictionary_mut)
                    .ok_or_else(|| malformed(&self.path, format!("apps[{index}] vanished")))?;
                entry.insert(CONTENT_VISIBILITY_KEY.to_string(), value);
            }
        }
        Ok(previous)
    }

    /// Every `apps` entry that carries a string `bundle-id`, in file order.
    pub fn app_entries(&self) -> Result<Vec<AppEntry>, PrefsError> {
        let Some(apps) = self.apps()? else {
            return Ok(vec![]);
        };

        let mut entries = Vec::new();
        for (index, value) in apps.iter().enumerate() {
            let Some(dict) = value.as_dictionary() else {
                continue;
            };
            let Some(bundle_id) = dict.get(BUNDLE_ID_KEY).and_then(Value::as_string) else {
                continue;
            };
            entries.push(AppEntry {
                index,
                bundle_id: BundleId::from(bundle_id),
                mode: self.mode_of(
                    dict.get(CONTENT_VISIBILITY_KEY),
                    &format!("apps[{index}].content_visibility"),
                )?,
            });
        }
        Ok(entries)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn apps(&self) -> Result<Option<&Vec<Value>>, PrefsError> {
        match self.root.get(APPS_KEY) {
            None => Ok(None),
            Some(value) => value
                .as_array()
                .map(Some)
                .ok_or_else(|| malformed(&self.path, "'apps' is not an array")),
        }
    }

    fn require_app(&self, bundle_id: &BundleId) -> Result<usize, PrefsError> {
        self.find_app(bundle_id)?
            .ok_or_else(|| PrefsError::BundleNotFound {
                bundle_id: bundle_id.0.clone(),
            })
    }

    fn app_entry(&self, index: usize) -> Result<&Dictionary, PrefsError> {
        self.apps()?
            .and_then(|apps| apps.get(index))
            .and_then(Value::as_dictionary)
            .ok_or_else(|| malformed(&self.path, format!("apps[{index}] is not a dictionary")))
    }

    fn mode_of(
        &self,
        value: Option<&Value>,
        field: &str,
    ) -> Result<NotificationPreviewMode, PrefsError> {
        let Some(value) = value else {
            return Ok(NotificationPreviewMode::Default);
        };
        let raw = value
            .as_signed_integer()
            .ok_or_else(|| malformed(&self.path, format!("{field} is not an integer")))?;
        NotificationPreviewMode::try_from(raw)
            .map_err(|_| malformed(&self.path, format!("{field} holds unknown mode {raw}")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
