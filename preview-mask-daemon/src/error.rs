use thiserror::Error;

/// Error surface for daemon restart dispatch and the apply pipeline.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("preferences error: {0}")]
    Prefs(#[from] preview_mask_core::PrefsError),

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn spawn_err(program: impl Into<String>, source: std::io::Error) -> DaemonError {
    DaemonError::Spawn {
        program: program.into(),
        source,
    }
}
