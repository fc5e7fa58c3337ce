//! Image acquisition: backend trait, Gemini client, placeholder, producer.
//!
//! The [`backend::GenerationBackend`] trait is the seam between the batch
//! loop and the outside world. The production implementation is
//! [`gemini::GeminiBackend`]; tests substitute a mock, and `--offline` runs
//! use [`backend::OfflineBackend`], which fails every request so the producer
//! renders placeholders throughout.

pub mod backend;
pub mod gemini;
pub mod placeholder;
pub mod producer;

pub use backend::{BackendError, GeneratedPayload, GenerationBackend, OfflineBackend};
pub use gemini::GeminiBackend;
pub use producer::{ImageOrigin, Produced, produce};
