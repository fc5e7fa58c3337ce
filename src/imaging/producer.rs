//! The image producer: backend call, decode, resize, placeholder fallback.
//!
//! `produce` is the one infallible step in the pipeline. It either returns a
//! generated image resized to the exact target dimensions, or a placeholder
//! carrying the prompt text. The caller learns which path was taken (and
//! why, on the fallback path) from [`ImageOrigin`], so generation failures
//! are typed data rather than swallowed exceptions.

use super::backend::{BackendError, GenerationBackend};
use super::placeholder;
use image::DynamicImage;
use image::imageops::FilterType;

/// Fixed style guidance wrapped around every catalog prompt.
const STYLE_PREFIX: &str =
    "Generate a clear, educational, professional photograph showing: ";
const STYLE_SUFFIX: &str = " The image should be realistic, well-lit, and suitable \
     for educational materials. Square format, no text, isolated subject on clean background.";

/// Where a produced image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOrigin {
    Generated,
    /// The backend failed; `reason` is the rendered [`BackendError`] (or
    /// decode error) that triggered the fallback.
    Placeholder { reason: String },
}

/// A produced image, always sized to the requested dimensions.
pub struct Produced {
    pub image: DynamicImage,
    pub origin: ImageOrigin,
}

impl Produced {
    pub fn is_generated(&self) -> bool {
        matches!(self.origin, ImageOrigin::Generated)
    }
}

/// Compose the full instruction sent to the backend.
pub fn elaborate(prompt: &str) -> String {
    format!("{STYLE_PREFIX}{prompt}.{STYLE_SUFFIX}")
}

/// Produce one image for `prompt` at exactly `size`. Never fails: any error
/// on the generation path yields a placeholder instead.
pub fn produce(
    backend: &dyn GenerationBackend,
    prompt: &str,
    size: (u32, u32),
) -> Produced {
    match try_generate(backend, prompt, size) {
        Ok(image) => Produced {
            image,
            origin: ImageOrigin::Generated,
        },
        Err(reason) => Produced {
            image: placeholder::render(prompt, size),
            origin: ImageOrigin::Placeholder {
                reason: reason.to_string(),
            },
        },
    }
}

/// The fallible generation path: backend call, decode, exact resize.
fn try_generate(
    backend: &dyn GenerationBackend,
    prompt: &str,
    size: (u32, u32),
) -> Result<DynamicImage, BackendError> {
    let payload = backend.generate(&elaborate(prompt))?;
    let decoded = image::load_from_memory(&payload.bytes).map_err(|e| {
        BackendError::Malformed(format!(
            "could not decode {} response: {e}",
            payload.mime_type
        ))
    })?;
    // The model typically returns 1024x1024; bring it to the pack's exact size.
    Ok(decoded.resize_exact(size.0, size.1, FilterType::Lanczos3))
}
