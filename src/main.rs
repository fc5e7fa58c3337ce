use clap::{Parser, Subcommand};
use edugen::imaging::{GeminiBackend, GenerationBackend, OfflineBackend};
use edugen::{archive, batch, catalog, config, manifest, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup; trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Flags for commands that call the generation backend.
#[derive(clap::Args)]
struct RunArgs {
    /// Gemini API key (falls back to the GEMINI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Override the pause between backend requests, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Skip the backend entirely and render placeholders for every image
    #[arg(long)]
    offline: bool,
}

#[derive(Parser)]
#[command(name = "edugen")]
#[command(about = "Batch generator for educational image packs")]
#[command(long_about = "\
Batch generator for educational image packs

The catalog is compiled in: two curriculum templates (environmental
pollution, hygiene) with nine sections and 260 images total. Each section
defines a target count and a short prompt list that is reused round-robin,
so prompts deliberately repeat with model-side variation.

Output structure:

  generated_images/
  ├── metadata.json                          # catalog summary, written last
  ├── template_1_pollution/
  │   ├── soil_contamination/
  │   │   ├── template_1_pollution_soil_contamination_01.png
  │   │   └── ...                            # exactly `count` files, 01..NN
  │   └── ...
  └── template_2_hygiene/
      └── ...

A failed generation never skips a file: the slot is filled with a
placeholder image carrying the prompt text, and the run summary reports
how many placeholders were substituted.

Optional edugen.toml in the working directory overrides defaults; CLI
flags override both. Run 'edugen plan' to preview the catalog without
touching the network.")]
#[command(version = version_string())]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "edugen.toml", global = true)]
    config: PathBuf,

    /// Output base directory (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Archive file path (overrides config)
    #[arg(long, global = true)]
    archive_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: directories → batch → manifest → archive
    Run(RunArgs),
    /// Print the catalog and image specification without generating
    Plan,
    /// Write metadata.json only
    Manifest,
    /// Zip an existing output tree only
    Archive,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::JobConfig::load(&cli.config)?;
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(archive_file) = cli.archive_file {
        config.archive_file = archive_file;
    }

    let templates = catalog::catalog();
    catalog::validate(templates)?;

    match cli.command {
        Command::Plan => {
            output::print_plan_output(templates, &config);
        }
        Command::Manifest => {
            std::fs::create_dir_all(&config.output_dir)?;
            let path = manifest::write(templates, &config)?;
            println!("Manifest written: {}", path.display());
        }
        Command::Archive => {
            let stats = archive::create(&config.output_dir, &config.archive_file)?;
            println!("{}", output::format_archive_line(&config.archive_file, &stats));
        }
        Command::Run(args) => {
            if let Some(delay_ms) = args.delay_ms {
                config.delay_ms = delay_ms;
            }
            config.validate()?;

            let backend = resolve_backend(&args, &config)?;
            let pacer = batch::FixedDelay::new(config.delay());

            println!("==> Generating {} images into {}", catalog::total_images(templates), config.output_dir.display());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_run_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let report = batch::run_batch(backend.as_ref(), templates, &config, &pacer, Some(tx))?;
            printer.join().unwrap();
            output::print_summary(&report);

            let manifest_path = manifest::write(templates, &config)?;
            println!("Manifest written: {}", manifest_path.display());

            // Archive failure is terminal but non-fatal: the tree and
            // manifest already exist on disk.
            match archive::create(&config.output_dir, &config.archive_file) {
                Ok(stats) => {
                    println!("{}", output::format_archive_line(&config.archive_file, &stats))
                }
                Err(e) => eprintln!(
                    "Archive creation failed: {} ({})",
                    e,
                    config.archive_file.display()
                ),
            }
        }
    }

    Ok(())
}

/// Pick the generation backend for a run.
fn resolve_backend(
    args: &RunArgs,
    config: &config::JobConfig,
) -> Result<Box<dyn GenerationBackend>, Box<dyn std::error::Error>> {
    if args.offline {
        return Ok(Box::new(OfflineBackend));
    }
    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .ok_or("no API key: pass --api-key or set GEMINI_API_KEY (or use --offline)")?;
    Ok(Box::new(GeminiBackend::new(
        api_key,
        config.model.clone(),
        config.request_timeout(),
    )?))
}
