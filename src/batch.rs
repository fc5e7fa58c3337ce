//! The sequential generation batch.
//!
//! One thread, one pass over the catalog in declared order. Per image the
//! lifecycle is: pick prompt (round-robin), produce (generated or
//! placeholder, never fails), save (failure logged and tolerated), pause.
//! Only directory creation aborts the run; everything downstream degrades
//! per-image instead.
//!
//! Progress is reported as [`RunEvent`]s over an optional channel so the
//! loop itself stays free of I/O formatting. `main` drains the channel on a
//! printer thread.

use crate::catalog::{self, Section, Template};
use crate::config::JobConfig;
use crate::imaging::{GenerationBackend, ImageOrigin, produce};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Pacing
// ============================================================================

/// Pause policy applied between backend requests within a section.
///
/// The production policy is a fixed delay (rate-limit courtesy, not adaptive
/// backoff). Tests inject [`NoDelay`].
pub trait Pacer {
    fn pause(&self);
}

/// Sleep a fixed interval.
pub struct FixedDelay(Duration);

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self(delay)
    }
}

impl Pacer for FixedDelay {
    fn pause(&self) {
        std::thread::sleep(self.0);
    }
}

/// No pause at all.
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&self) {}
}

// ============================================================================
// Events and report
// ============================================================================

/// Terminal state of one image's save step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed(String),
}

/// Progress event emitted by [`run_batch`].
#[derive(Debug, Clone)]
pub enum RunEvent {
    TemplateStarted {
        name: String,
    },
    SectionStarted {
        name: String,
        count: u32,
    },
    ImageFinished {
        /// 1-based position within the section.
        index: u32,
        count: u32,
        filename: String,
        prompt: String,
        origin: ImageOrigin,
        outcome: SaveOutcome,
    },
}

/// Final counters for a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Images the catalog called for and the loop attempted.
    pub attempted: u32,
    /// Files that actually landed on disk.
    pub saved: u32,
    /// Saved files that came from the backend (vs. placeholder).
    pub generated: u32,
    /// Saved files that came from the placeholder fallback.
    pub placeholders: u32,
}

// ============================================================================
// Directory builder
// ============================================================================

/// Ensure `<base>/<template>/<section>/` exists for every catalog pair.
///
/// A failure here is fatal to the run; there is no per-image recovery from a
/// tree that cannot be created.
pub fn create_directories(base: &Path, templates: &[Template]) -> Result<(), BatchError> {
    std::fs::create_dir_all(base)?;
    for template in templates {
        for section in template.sections {
            std::fs::create_dir_all(base.join(template.id).join(section.id))?;
        }
    }
    Ok(())
}

/// Output path for one image.
fn image_path(base: &Path, template: &Template, section: &Section, index: u32) -> PathBuf {
    base.join(template.id)
        .join(section.id)
        .join(catalog::image_filename(template.id, section.id, index))
}

// ============================================================================
// The batch loop
// ============================================================================

/// Walk the catalog and produce every image.
///
/// Existing files with matching names are overwritten. Returns the final
/// counters; per-image failures are reported through `events`, not errors.
pub fn run_batch(
    backend: &dyn GenerationBackend,
    templates: &[Template],
    config: &JobConfig,
    pacer: &dyn Pacer,
    events: Option<Sender<RunEvent>>,
) -> Result<RunReport, BatchError> {
    create_directories(&config.output_dir, templates)?;

    let mut report = RunReport::default();
    let size = config.target_size();

    for template in templates {
        send(&events, RunEvent::TemplateStarted {
            name: template.name.to_string(),
        });

        for section in template.sections {
            send(&events, RunEvent::SectionStarted {
                name: section.name.to_string(),
                count: section.count,
            });

            for i in 0..section.count {
                let prompt = catalog::prompt_at(section, i);
                let index = i + 1;
                let path = image_path(&config.output_dir, template, section, index);

                let produced = produce(backend, prompt, size);
                report.attempted += 1;

                let outcome = match produced.image.save(&path) {
                    Ok(()) => {
                        report.saved += 1;
                        if produced.is_generated() {
                            report.generated += 1;
                        } else {
                            report.placeholders += 1;
                        }
                        SaveOutcome::Saved
                    }
                    Err(e) => SaveOutcome::Failed(e.to_string()),
                };

                send(&events, RunEvent::ImageFinished {
                    index,
                    count: section.count,
                    filename: catalog::image_filename(template.id, section.id, index),
                    prompt: prompt.to_string(),
                    origin: produced.origin,
                    outcome,
                });

                // Pause between requests, but not after a section's last image.
                if index < section.count {
                    pacer.pause();
                }
            }
        }
    }

    Ok(report)
}

fn send(events: &Option<Sender<RunEvent>>, event: RunEvent) {
    if let Some(tx) = events {
        // A dropped receiver just means nobody is listening anymore.
        let _ = tx.send(event);
    }
}
