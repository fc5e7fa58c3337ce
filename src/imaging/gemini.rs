//! Gemini generateContent client.
//!
//! Thin blocking wrapper over the `generativelanguage.googleapis.com` REST
//! surface. One request per image: a single text part in, and with luck a
//! single `inlineData` part back. Anything else (non-2xx status, transport
//! error, no image part, bad base64) surfaces as a [`BackendError`] for the
//! producer to turn into a placeholder.
//!
//! The only timeout in the whole system is the client-level one configured
//! here; the batch otherwise waits as long as the backend takes.

use super::backend::{BackendError, GeneratedPayload, GenerationBackend};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_ROOT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiBackend {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_ROOT, self.model)
    }
}

impl GenerationBackend for GeminiBackend {
    fn generate(&self, instruction: &str) -> Result<GeneratedPayload, BackendError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(instruction.to_string()),
                    inline_data: None,
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| BackendError::Malformed(e.to_string()))?;
        extract_image(&parsed)
    }
}

/// Pull the first image part out of a response and decode its base64 data.
fn extract_image(response: &GenerateContentResponse) -> Result<GeneratedPayload, BackendError> {
    for candidate in &response.candidates {
        let Some(content) = &candidate.content else {
            continue;
        };
        for part in &content.parts {
            let Some(inline) = &part.inline_data else {
                continue;
            };
            if !inline.mime_type.starts_with("image") {
                continue;
            }
            let bytes = BASE64
                .decode(&inline.data)
                .map_err(|e| BackendError::Malformed(format!("base64 decode failed: {e}")))?;
            return Ok(GeneratedPayload {
                bytes,
                mime_type: inline.mime_type.clone(),
            });
        }
    }
    Err(BackendError::NoImage)
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}
