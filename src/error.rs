//! Crate-wide error type.

use thiserror::Error;

/// Errors surfaced to callers of the drum machine core.
///
/// Synthesis problems for a single pad never show up here: a trigger with
/// unusable parameters is skipped inside the synthesizer so the rest of the
/// kit keeps playing.
#[derive(Debug, Error)]
pub enum Error {
    /// No audio output device or stream could be obtained.
    #[error("audio engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The host cannot tap the mixed signal path.
    #[error("recording unsupported: {0}")]
    RecordingUnsupported(String),

    /// An ingested kit violates the shape invariants and could not be normalized.
    #[error("malformed kit descriptor: {0}")]
    MalformedKitDescriptor(String),

    /// The WAV encoder rejected the capture.
    #[error("failed to encode WAV: {0}")]
    Wav(#[from] hound::Error),

    /// A worker thread could not be started.
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        /// Which worker failed.
        name: &'static str,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked before handing its state back.
    #[error("{0} thread panicked")]
    WorkerPanicked(&'static str),
}

impl Error {
    pub(crate) fn engine(err: impl std::fmt::Display) -> Self {
        Self::EngineUnavailable(err.to_string())
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedKitDescriptor(reason.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedKitDescriptor(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
