//! Generation backend trait and shared types.
//!
//! A backend turns a fully elaborated instruction string into raw image
//! bytes, or fails. That is the whole contract: decoding, resizing, and the
//! placeholder fallback live in [`producer`](super::producer), so every
//! failure shape a backend can produce is handled in exactly one place.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response contained no image part")]
    NoImage,
    #[error("offline mode, no request attempted")]
    Offline,
}

/// Raw image bytes as returned by a backend, with the declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Trait for image generation backends.
///
/// `instruction` is the full elaborated prompt, not the raw catalog prompt;
/// prompt elaboration belongs to the producer so backends stay dumb pipes.
pub trait GenerationBackend {
    fn generate(&self, instruction: &str) -> Result<GeneratedPayload, BackendError>;
}

/// Backend for `--offline` runs: fails every request so the producer
/// substitutes placeholders. Useful for exercising the whole pipeline
/// without a credential or network.
pub struct OfflineBackend;

impl GenerationBackend for OfflineBackend {
    fn generate(&self, _instruction: &str) -> Result<GeneratedPayload, BackendError> {
        Err(BackendError::Offline)
    }
}
