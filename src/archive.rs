// src/archive.rs

//! Source archive extraction
//!
//! Unpacks tar archives (gzip, xz, or uncompressed) into a private staging
//! directory. Entries that would escape the destination are rejected, and
//! oversized entries are skipped with a warning.
//!
//! Release tarballs from forges wrap their content in a single
//! `<name>-<version>/` directory; [`archive_root`] resolves that wrapper so
//! callers see the logical root of the source tree.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tar::Archive;
use tracing::{debug, warn};
use xz2::read::XzDecoder;

/// Maximum size for a single file during extraction (512 MB)
const MAX_EXTRACTION_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Supported archive compression formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompressionFormat {
    Gzip,
    Xz,
    None,
}

/// Detect compression format from the archive filename
fn detect_compression(path: &Path) -> Result<CompressionFormat> {
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if filename.ends_with(".tar.gz") || filename.ends_with(".tgz") {
        Ok(CompressionFormat::Gzip)
    } else if filename.ends_with(".tar.xz") || filename.ends_with(".txz") {
        Ok(CompressionFormat::Xz)
    } else if filename.ends_with(".tar") {
        Ok(CompressionFormat::None)
    } else {
        Err(Error::Parse(format!(
            "Unsupported archive format: {}. Expected .tar.gz, .tgz, .tar.xz, .txz, or .tar",
            filename
        )))
    }
}

/// Open and decompress an archive for reading
fn open_archive(path: &Path) -> Result<Archive<Box<dyn Read>>> {
    let file = File::open(path)
        .map_err(|e| Error::IoError(format!("Failed to open archive {}: {}", path.display(), e)))?;

    let reader: Box<dyn Read> = match detect_compression(path)? {
        CompressionFormat::Gzip => Box::new(GzDecoder::new(file)),
        CompressionFormat::Xz => Box::new(XzDecoder::new(file)),
        CompressionFormat::None => Box::new(file),
    };

    Ok(Archive::new(reader))
}

/// Check whether an archive entry path is safe to extract
fn is_safe_entry_path(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && !path.is_absolute()
        && !path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
}

/// Unpack an archive into `dest` and return the archive root
///
/// The archive root is `dest` itself, unless the unpacked tree consists of
/// exactly one directory and nothing else, in which case that directory is
/// the root (the single-wrapper-directory convention of release tarballs).
pub fn unpack(archive_path: &Path, dest: &Path) -> Result<PathBuf> {
    debug!("Unpacking {} into {}", archive_path.display(), dest.display());

    let mut archive = open_archive(archive_path)?;

    for entry in archive
        .entries()
        .map_err(|e| Error::Parse(format!("Failed to read archive entries: {}", e)))?
    {
        let mut entry =
            entry.map_err(|e| Error::Parse(format!("Corrupt archive entry: {}", e)))?;

        let entry_path = entry
            .path()
            .map_err(|e| Error::Parse(format!("Invalid entry path: {}", e)))?
            .into_owned();

        if !is_safe_entry_path(&entry_path) {
            return Err(Error::Parse(format!(
                "Archive entry escapes destination: {}",
                entry_path.display()
            )));
        }

        if entry.header().entry_type().is_file() && entry.size() > MAX_EXTRACTION_FILE_SIZE {
            warn!(
                "Skipping oversized file: {} ({} bytes)",
                entry_path.display(),
                entry.size()
            );
            continue;
        }

        entry.unpack_in(dest).map_err(|e| {
            Error::IoError(format!(
                "Failed to extract {}: {}",
                entry_path.display(),
                e
            ))
        })?;
    }

    archive_root(dest)
}

/// Resolve the logical root of an unpacked tree
fn archive_root(dest: &Path) -> Result<PathBuf> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dest)
        .map_err(|e| Error::IoError(format!("Failed to read {}: {}", dest.display(), e)))?
    {
        entries.push(entry.map_err(Error::Io)?);
    }

    if entries.len() == 1 && entries[0].path().is_dir() {
        debug!("Archive root is wrapper directory {}", entries[0].path().display());
        Ok(entries[0].path())
    } else {
        Ok(dest.to_path_buf())
    }
}
