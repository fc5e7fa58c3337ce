//! CLI output formatting for plan, batch progress, and summary.
//!
//! Each surface has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Plan
//!
//! ```text
//! Templates
//! 001 Environmental Pollution (130 images)
//!     001 Soil Contamination (26 images, 5 prompts)
//!     002 Water Pollution (26 images, 5 prompts)
//!
//! 260 images at 584x584 px, 72 DPI
//! Output: generated_images
//! Archive: educational_images_pack.zip
//! ```
//!
//! ## Run
//!
//! ```text
//! Environmental Pollution
//!     Soil Contamination (26 images)
//!         01/26 generated    template_1_pollution_soil_contamination_01.png
//!         02/26 placeholder  template_1_pollution_soil_contamination_02.png
//!             Reason: request failed: connection refused
//! ```
//!
//! The per-image success marker is the only place the generated/placeholder
//! distinction is visible; the manifest deliberately does not carry it.

use crate::archive::ArchiveStats;
use crate::batch::{RunEvent, RunReport, SaveOutcome};
use crate::catalog::{Template, total_images};
use crate::config::JobConfig;
use crate::imaging::ImageOrigin;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Plan
// ============================================================================

/// Format the catalog summary shown by `edugen plan`.
pub fn format_plan_output(templates: &[Template], config: &JobConfig) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Templates".to_string());

    for (t, template) in templates.iter().enumerate() {
        lines.push(format!(
            "{} {} ({} images)",
            format_index(t + 1),
            template.name,
            template.image_count()
        ));
        for (s, section) in template.sections.iter().enumerate() {
            lines.push(format!(
                "    {} {} ({} images, {} prompts)",
                format_index(s + 1),
                section.name,
                section.count,
                section.prompts.len()
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} images at {}x{} px, {} DPI",
        total_images(templates),
        config.image_size[0],
        config.image_size[1],
        config.dpi
    ));
    lines.push(format!("Output: {}", config.output_dir.display()));
    lines.push(format!("Archive: {}", config.archive_file.display()));
    lines
}

pub fn print_plan_output(templates: &[Template], config: &JobConfig) {
    for line in format_plan_output(templates, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Batch progress
// ============================================================================

/// Format a single batch progress event as display lines.
pub fn format_run_event(event: &RunEvent) -> Vec<String> {
    match event {
        RunEvent::TemplateStarted { name } => vec![name.clone()],
        RunEvent::SectionStarted { name, count } => {
            vec![format!("    {} ({} images)", name, count)]
        }
        RunEvent::ImageFinished {
            index,
            count,
            filename,
            prompt,
            origin,
            outcome,
        } => {
            let marker = match (outcome, origin) {
                (SaveOutcome::Failed(_), _) => "save failed",
                (SaveOutcome::Saved, ImageOrigin::Generated) => "generated",
                (SaveOutcome::Saved, ImageOrigin::Placeholder { .. }) => "placeholder",
            };
            let mut lines = vec![format!(
                "        {:02}/{:02} {:<12} {}",
                index, count, marker, filename
            )];
            if let ImageOrigin::Placeholder { reason } = origin {
                lines.push(format!("            Reason: {}", reason));
                lines.push(format!("            Prompt: {}", prompt));
            }
            if let SaveOutcome::Failed(error) = outcome {
                lines.push(format!("            Error: {}", error));
            }
            lines
        }
    }
}

// ============================================================================
// Summary and archive
// ============================================================================

/// Format the end-of-run counters.
pub fn format_summary(report: &RunReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Saved {}/{} images ({} generated, {} placeholders)",
        report.saved, report.attempted, report.generated, report.placeholders
    )];
    let failed = report.attempted - report.saved;
    if failed > 0 {
        lines.push(format!("{} images failed to save", failed));
    }
    lines
}

pub fn print_summary(report: &RunReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}

/// Format the archive result line.
pub fn format_archive_line(path: &Path, stats: &ArchiveStats) -> String {
    format!(
        "Archive created: {} ({} files, {:.2} MB)",
        path.display(),
        stats.files,
        stats.bytes as f64 / (1024.0 * 1024.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use std::path::PathBuf;

    #[test]
    fn plan_output_lists_templates_and_sections() {
        let lines = format_plan_output(catalog(), &JobConfig::default());
        assert_eq!(lines[0], "Templates");
        assert_eq!(lines[1], "001 Environmental Pollution (130 images)");
        assert_eq!(lines[2], "    001 Soil Contamination (26 images, 5 prompts)");
        assert!(lines.contains(&"260 images at 584x584 px, 72 DPI".to_string()));
    }

    #[test]
    fn plan_output_shows_paths() {
        let config = JobConfig {
            output_dir: PathBuf::from("imgs"),
            archive_file: PathBuf::from("pack.zip"),
            ..JobConfig::default()
        };
        let lines = format_plan_output(catalog(), &config);
        assert!(lines.contains(&"Output: imgs".to_string()));
        assert!(lines.contains(&"Archive: pack.zip".to_string()));
    }

    #[test]
    fn run_event_template_and_section_headers() {
        let lines = format_run_event(&RunEvent::TemplateStarted {
            name: "Hygiene Types".to_string(),
        });
        assert_eq!(lines, vec!["Hygiene Types"]);

        let lines = format_run_event(&RunEvent::SectionStarted {
            name: "Food Hygiene".to_string(),
            count: 33,
        });
        assert_eq!(lines, vec!["    Food Hygiene (33 images)"]);
    }

    #[test]
    fn run_event_generated_image_single_line() {
        let lines = format_run_event(&RunEvent::ImageFinished {
            index: 1,
            count: 26,
            filename: "t_s_01.png".to_string(),
            prompt: "a turtle".to_string(),
            origin: ImageOrigin::Generated,
            outcome: SaveOutcome::Saved,
        });
        assert_eq!(lines, vec!["        01/26 generated    t_s_01.png"]);
    }

    #[test]
    fn run_event_placeholder_shows_reason_and_prompt() {
        let lines = format_run_event(&RunEvent::ImageFinished {
            index: 2,
            count: 26,
            filename: "t_s_02.png".to_string(),
            prompt: "a turtle".to_string(),
            origin: ImageOrigin::Placeholder {
                reason: "backend returned status 503".to_string(),
            },
            outcome: SaveOutcome::Saved,
        });
        assert_eq!(lines[0], "        02/26 placeholder  t_s_02.png");
        assert_eq!(lines[1], "            Reason: backend returned status 503");
        assert_eq!(lines[2], "            Prompt: a turtle");
    }

    #[test]
    fn run_event_save_failure_shows_error() {
        let lines = format_run_event(&RunEvent::ImageFinished {
            index: 3,
            count: 26,
            filename: "t_s_03.png".to_string(),
            prompt: "a turtle".to_string(),
            origin: ImageOrigin::Generated,
            outcome: SaveOutcome::Failed("permission denied".to_string()),
        });
        assert_eq!(lines[0], "        03/26 save failed  t_s_03.png");
        assert_eq!(lines[1], "            Error: permission denied");
    }

    #[test]
    fn summary_reports_both_counters() {
        let report = RunReport {
            attempted: 260,
            saved: 260,
            generated: 258,
            placeholders: 2,
        };
        assert_eq!(
            format_summary(&report),
            vec!["Saved 260/260 images (258 generated, 2 placeholders)"]
        );
    }

    #[test]
    fn summary_calls_out_save_failures() {
        let report = RunReport {
            attempted: 10,
            saved: 8,
            generated: 8,
            placeholders: 0,
        };
        let lines = format_summary(&report);
        assert_eq!(lines[1], "2 images failed to save");
    }

    #[test]
    fn archive_line_formats_size_in_mb() {
        let stats = ArchiveStats {
            files: 261,
            bytes: 5 * 1024 * 1024,
        };
        assert_eq!(
            format_archive_line(Path::new("pack.zip"), &stats),
            "Archive created: pack.zip (261 files, 5.00 MB)"
        );
    }
}
