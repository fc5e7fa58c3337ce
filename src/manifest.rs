//! The pack manifest: `metadata.json`.
//!
//! Written exactly once, after the batch loop finishes, regardless of how
//! many images actually saved. The manifest is a description of the
//! catalog's intent (what the pack should contain), not a run log; actual
//! yield lives in the console summary. Keep that asymmetry unless product
//! intent changes.

use crate::catalog::Template;
use crate::config::JobConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

pub const PROJECT_NAME: &str = "EduGen - Educational Image Batch Generator";
pub const SCHEMA_VERSION: &str = "1.0";

/// The manifest file name, always directly under the output base directory.
pub const MANIFEST_FILENAME: &str = "metadata.json";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub project: String,
    pub version: String,
    /// Sum of all section target counts; independent of actual saves.
    pub total_images: u32,
    pub image_specifications: ImageSpecifications,
    pub templates: BTreeMap<String, TemplateEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageSpecifications {
    pub width_cm: u32,
    pub height_cm: u32,
    pub width_px: u32,
    pub height_px: u32,
    pub dpi: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    pub sections: BTreeMap<String, SectionEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SectionEntry {
    pub name: String,
    pub count: u32,
}

/// Build the manifest from the catalog and image specification.
pub fn build(templates: &[Template], config: &JobConfig) -> Manifest {
    let entries = templates
        .iter()
        .map(|template| {
            let sections = template
                .sections
                .iter()
                .map(|section| {
                    (
                        section.id.to_string(),
                        SectionEntry {
                            name: section.name.to_string(),
                            count: section.count,
                        },
                    )
                })
                .collect();
            (
                template.id.to_string(),
                TemplateEntry {
                    name: template.name.to_string(),
                    sections,
                },
            )
        })
        .collect();

    Manifest {
        project: PROJECT_NAME.to_string(),
        version: SCHEMA_VERSION.to_string(),
        total_images: crate::catalog::total_images(templates),
        image_specifications: ImageSpecifications {
            width_cm: config.print_size_cm[0],
            height_cm: config.print_size_cm[1],
            width_px: config.image_size[0],
            height_px: config.image_size[1],
            dpi: config.dpi,
        },
        templates: entries,
    }
}

/// Write `metadata.json` (pretty, UTF-8) under the output base directory.
/// Returns the path written.
pub fn write(
    templates: &[Template],
    config: &JobConfig,
) -> Result<std::path::PathBuf, ManifestError> {
    let manifest = build(templates, config);
    let path = config.output_dir.join(MANIFEST_FILENAME);
    write_to(&manifest, &path)?;
    Ok(path)
}

fn write_to(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json)?;
    Ok(())
}
