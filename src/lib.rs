//! # EduGen
//!
//! A batch generator for educational image packs. A static catalog describes
//! two curriculum templates (environmental pollution, hygiene), each split
//! into sections with a target image count and a cyclic prompt list. EduGen
//! walks that catalog, asks the Gemini image model for each picture, and
//! leaves behind a ready-to-ship directory tree, a JSON manifest, and a zip.
//!
//! # Architecture: One Sequential Pipeline
//!
//! ```text
//! 1. Directories   catalog           →  <output>/<template>/<section>/
//! 2. Batch         catalog + backend →  NN.png per section (placeholder on failure)
//! 3. Manifest      catalog           →  <output>/metadata.json
//! 4. Archive       <output>/         →  educational_images_pack.zip
//! ```
//!
//! The batch is deliberately single-threaded: every image request blocks
//! until it resolves, and a fixed pause between requests keeps the backend
//! happy. There is no retry machinery; a failed generation is substituted
//! with a locally rendered placeholder so a section always ends up with
//! exactly its target number of files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Static template/section/prompt data and deterministic naming |
//! | [`config`] | `edugen.toml` loading, defaults, validation |
//! | [`imaging`] | Generation backend trait, Gemini client, placeholder renderer, producer |
//! | [`batch`] | The sequential generation loop: directories, pacing, counters |
//! | [`manifest`] | `metadata.json` writer |
//! | [`archive`] | Zips the output tree |
//! | [`output`] | CLI output formatting for plan, progress, and summary |
//!
//! # Design Decisions
//!
//! ## Placeholder Fallback, Not Retries
//!
//! The backend is treated as unreliable by contract. Any failure shape
//! (transport error, non-2xx status, response without an image part,
//! undecodable bytes) is routed to the producer's fallback, which renders
//! the prompt text onto a plain background. The batch never stops for a
//! generation failure, and per-section file counts stay deterministic.
//!
//! ## Manifest Reflects Intent, Not Yield
//!
//! `metadata.json` reports the catalog's target counts even when some saves
//! failed. The manifest describes what the pack *should* contain; the run
//! summary on stdout is where actual yield is reported.
//!
//! ## Explicit Configuration, No Globals
//!
//! All knobs (output directory, archive path, pixel size, pause length) live
//! in [`config::JobConfig`], built once in `main` and passed down. The API
//! credential is resolved separately from flag or environment and handed
//! only to the Gemini client.

pub mod archive;
pub mod batch;
pub mod catalog;
pub mod config;
pub mod imaging;
pub mod manifest;
pub mod output;
