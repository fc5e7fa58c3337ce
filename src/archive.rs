//! Zips the output tree.
//!
//! Entry paths are relative to the output directory's *parent*, so the
//! archive's top-level entry is the output directory name itself and
//! unpacking next to the zip recreates `generated_images/...` exactly.
//! Archive failure is reported by the caller but never undoes the batch:
//! images and manifest are already on disk.

use std::fs::File;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// What ended up in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    pub files: usize,
    /// Size of the finished archive on disk.
    pub bytes: u64,
}

/// Walk `base` recursively and write every file into a deflate zip at
/// `archive_path`.
pub fn create(base: &Path, archive_path: &Path) -> Result<ArchiveStats, ArchiveError> {
    let root = base.parent().unwrap_or_else(|| Path::new(""));
    let mut zip = zip::ZipWriter::new(File::create(archive_path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut files = 0;
    for entry in WalkDir::new(base).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        // Guard against archiving into the tree being archived.
        if entry.path() == archive_path {
            continue;
        }
        // root is an ancestor of everything walkdir yields under base.
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        zip.start_file(zip_entry_name(rel), options)?;
        let mut input = File::open(entry.path())?;
        std::io::copy(&mut input, &mut zip)?;
        files += 1;
    }

    zip.finish()?;
    let bytes = std::fs::metadata(archive_path)?.len();
    Ok(ArchiveStats { files, bytes })
}

/// Zip entries always use forward slashes, whatever the host separator.
fn zip_entry_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
