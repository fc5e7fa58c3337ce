//! End-to-end pipeline tests: batch → manifest → archive against a stub
//! backend, exercising the same wiring `edugen run` uses.

use edugen::batch::{NoDelay, run_batch};
use edugen::catalog::{Section, Template};
use edugen::config::JobConfig;
use edugen::imaging::{BackendError, GeneratedPayload, GenerationBackend};
use edugen::{archive, manifest};
use std::fs::File;
use std::sync::Mutex;
use tempfile::TempDir;

/// Two templates, three sections, 13 images total.
const SMALL_CATALOG: &[Template] = &[
    Template {
        id: "nature",
        name: "Nature",
        sections: &[
            Section {
                id: "rivers",
                name: "Rivers",
                count: 5,
                prompts: &["wide river", "mountain stream", "river delta"],
            },
            Section {
                id: "forests",
                name: "Forests",
                count: 3,
                prompts: &["pine forest"],
            },
        ],
    },
    Template {
        id: "cities",
        name: "Cities",
        sections: &[Section {
            id: "streets",
            name: "Streets",
            count: 5,
            prompts: &["market street", "quiet alley"],
        }],
    },
];

fn png_payload() -> GeneratedPayload {
    let img = image::RgbImage::from_pixel(24, 24, image::Rgb([120, 120, 200]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    GeneratedPayload {
        bytes,
        mime_type: "image/png".to_string(),
    }
}

/// Succeeds except on the call numbers listed in `fail_on` (1-based).
struct FlakyBackend {
    fail_on: Vec<u32>,
    calls: Mutex<u32>,
    prompts: Mutex<Vec<String>>,
}

impl FlakyBackend {
    fn new(fail_on: Vec<u32>) -> Self {
        Self {
            fail_on,
            calls: Mutex::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl GenerationBackend for FlakyBackend {
    fn generate(&self, instruction: &str) -> Result<GeneratedPayload, BackendError> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        self.prompts.lock().unwrap().push(instruction.to_string());
        if self.fail_on.contains(&calls) {
            return Err(BackendError::NoImage);
        }
        Ok(png_payload())
    }
}

fn job_config(tmp: &TempDir) -> JobConfig {
    JobConfig {
        output_dir: tmp.path().join("pack"),
        archive_file: tmp.path().join("pack.zip"),
        image_size: [32, 32],
        ..JobConfig::default()
    }
}

fn count_pngs(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .path()
                .extension()
                .is_some_and(|ext| ext == "png")
        })
        .count()
}

#[test]
fn full_pipeline_produces_tree_manifest_and_archive() {
    let tmp = TempDir::new().unwrap();
    let config = job_config(&tmp);
    let backend = FlakyBackend::new(vec![]);

    let report = run_batch(&backend, SMALL_CATALOG, &config, &NoDelay, None).unwrap();
    assert_eq!(report.attempted, 13);
    assert_eq!(report.saved, 13);
    assert_eq!(report.generated, 13);

    // Every section directory holds exactly its target count.
    assert_eq!(count_pngs(&config.output_dir.join("nature/rivers")), 5);
    assert_eq!(count_pngs(&config.output_dir.join("nature/forests")), 3);
    assert_eq!(count_pngs(&config.output_dir.join("cities/streets")), 5);

    let manifest_path = manifest::write(SMALL_CATALOG, &config).unwrap();
    let parsed: manifest::Manifest =
        serde_json::from_str(&std::fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(parsed.total_images, 13);

    let stats = archive::create(&config.output_dir, &config.archive_file).unwrap();
    // 13 images + metadata.json
    assert_eq!(stats.files, 14);

    let mut zip = zip::ZipArchive::new(File::open(&config.archive_file).unwrap()).unwrap();
    // Entries are rooted at the output directory name.
    assert!(zip.by_name("pack/metadata.json").is_ok());
    assert!(zip.by_name("pack/nature/rivers/nature_rivers_01.png").is_ok());
    assert!(zip.by_name("pack/cities/streets/cities_streets_05.png").is_ok());
}

#[test]
fn backend_failures_yield_placeholders_not_gaps() {
    let tmp = TempDir::new().unwrap();
    let config = job_config(&tmp);
    // Calls 2 and 9 fail: one in rivers, one in streets.
    let backend = FlakyBackend::new(vec![2, 9]);

    let report = run_batch(&backend, SMALL_CATALOG, &config, &NoDelay, None).unwrap();

    assert_eq!(report.saved, 13);
    assert_eq!(report.generated, 11);
    assert_eq!(report.placeholders, 2);
    assert_eq!(count_pngs(&config.output_dir.join("nature/rivers")), 5);
    assert_eq!(count_pngs(&config.output_dir.join("cities/streets")), 5);

    // Manifest intent is unaffected by the failures.
    let manifest_path = manifest::write(SMALL_CATALOG, &config).unwrap();
    let parsed: manifest::Manifest =
        serde_json::from_str(&std::fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(parsed.total_images, 13);
}

#[test]
fn prompts_cycle_in_catalog_order() {
    let tmp = TempDir::new().unwrap();
    let config = job_config(&tmp);
    let backend = FlakyBackend::new(vec![]);

    run_batch(&backend, SMALL_CATALOG, &config, &NoDelay, None).unwrap();

    let prompts = backend.prompts.lock().unwrap();
    // rivers: 5 images over 3 prompts → positions [0,1,2,0,1]
    assert!(prompts[0].contains("wide river"));
    assert!(prompts[1].contains("mountain stream"));
    assert!(prompts[2].contains("river delta"));
    assert!(prompts[3].contains("wide river"));
    assert!(prompts[4].contains("mountain stream"));
    // forests: single prompt reused throughout
    assert!(prompts[5..8].iter().all(|p| p.contains("pine forest")));
}

#[test]
fn saved_images_have_exact_configured_dimensions() {
    let tmp = TempDir::new().unwrap();
    let config = JobConfig {
        image_size: [48, 40],
        ..job_config(&tmp)
    };
    // One generated, rest placeholders: both paths must honor the size.
    let backend = FlakyBackend::new(vec![2, 3]);

    run_batch(&backend, &SMALL_CATALOG[..1], &config, &NoDelay, None).unwrap();

    for entry in std::fs::read_dir(config.output_dir.join("nature/rivers")).unwrap() {
        let dims = image::image_dimensions(entry.unwrap().path()).unwrap();
        assert_eq!(dims, (48, 40));
    }
}
