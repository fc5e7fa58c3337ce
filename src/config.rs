//! Job configuration.
//!
//! Defaults match the production pack (584x584 px at 72 DPI, 500 ms pause,
//! `generated_images/` output). An optional `edugen.toml` next to the binary
//! overrides just the values it names; CLI flags override both. The struct is
//! built once in `main` and passed down, so nothing reads configuration from
//! process-wide state.
//!
//! ```toml
//! # All options are optional - defaults shown below
//! output_dir = "generated_images"
//! archive_file = "educational_images_pack.zip"
//! model = "gemini-2.5-flash-image"
//! image_size = [584, 584]      # exact output pixel dimensions
//! print_size_cm = [2, 2]       # physical size declared in the manifest
//! dpi = 72
//! delay_ms = 500               # pause between backend requests
//! request_timeout_secs = 60    # client-level HTTP timeout
//! ```
//!
//! The API credential is deliberately not a config-file key. It comes from
//! `--api-key` or the `GEMINI_API_KEY` environment variable and never touches
//! disk through this module.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything a run needs to know, minus the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Base directory the image tree is written under.
    pub output_dir: PathBuf,
    /// Path of the zip produced after the batch.
    pub archive_file: PathBuf,
    /// Gemini model name used for generation requests.
    pub model: String,
    /// Exact output dimensions; every saved image is resized to this.
    pub image_size: [u32; 2],
    /// Physical print size declared in the manifest.
    pub print_size_cm: [u32; 2],
    pub dpi: u32,
    /// Pause between backend requests within a section.
    pub delay_ms: u64,
    /// HTTP client timeout. The only timeout in the system; an unresponsive
    /// backend otherwise stalls the batch by design.
    pub request_timeout_secs: u64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated_images"),
            archive_file: PathBuf::from("educational_images_pack.zip"),
            model: "gemini-2.5-flash-image".to_string(),
            image_size: [584, 584],
            print_size_cm: [2, 2],
            dpi: 72,
            delay_ms: 500,
            request_timeout_secs: 60,
        }
    }
}

impl JobConfig {
    /// Load config from a TOML file, or return defaults if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: JobConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_size[0] == 0 || self.image_size[1] == 0 {
            return Err(ConfigError::Validation(
                "image_size values must be non-zero".into(),
            ));
        }
        if self.model.is_empty() {
            return Err(ConfigError::Validation("model must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Target dimensions as a (width, height) pair.
    pub fn target_size(&self) -> (u32, u32) {
        (self.image_size[0], self.image_size[1])
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_pack() {
        let config = JobConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("generated_images"));
        assert_eq!(config.image_size, [584, 584]);
        assert_eq!(config.dpi, 72);
        assert_eq!(config.delay_ms, 500);
        assert_eq!(config.model, "gemini-2.5-flash-image");
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = JobConfig::load(&tmp.path().join("edugen.toml")).unwrap();
        assert_eq!(config.delay_ms, JobConfig::default().delay_ms);
    }

    #[test]
    fn load_sparse_file_overrides_named_keys_only() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("edugen.toml");
        std::fs::write(&path, "delay_ms = 0\nimage_size = [64, 64]\n").unwrap();

        let config = JobConfig::load(&path).unwrap();
        assert_eq!(config.delay_ms, 0);
        assert_eq!(config.image_size, [64, 64]);
        assert_eq!(config.dpi, 72);
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("edugen.toml");
        std::fs::write(&path, "delay_msec = 100\n").unwrap();

        assert!(matches!(
            JobConfig::load(&path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_size() {
        let config = JobConfig {
            image_size: [0, 584],
            ..JobConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_empty_model() {
        let config = JobConfig {
            model: String::new(),
            ..JobConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn target_size_pairs_width_height() {
        let config = JobConfig {
            image_size: [100, 200],
            ..JobConfig::default()
        };
        assert_eq!(config.target_size(), (100, 200));
    }
}
