// src/error.rs

//! Crate-wide error type
//!
//! Every pipeline step surfaces its failure through this enum and aborts the
//! install. Nothing is recovered locally and nothing is retried once a step
//! has produced a result (the HTTP client retries transport failures
//! internally before a download counts as completed).

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A name in `depends_on` is neither installed nor installable
    #[error("missing dependency '{dependency}' required by '{package}': {reason}")]
    MissingDependency {
        package: String,
        dependency: String,
        reason: String,
    },

    /// Downloaded archive digest disagrees with the formula's sha256
    #[error("sha256 mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// The formula's install file is absent from the unpacked archive root
    #[error("file '{file}' not found in archive root {root}")]
    FileNotFoundInArchive { file: String, root: PathBuf },

    /// The binary directory (or another install target) is not writable
    #[error("permission denied: {0}")]
    Permission(String),

    /// The installed executable failed its post-install `--help` check
    #[error("smoke test failed: {0}")]
    SmokeTestFailure(String),

    /// Network fetch failed after retries
    #[error("download failed: {0}")]
    Download(String),

    /// Formula or archive content could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Named formula (or other resource) does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Filesystem failure with added context
    #[error("I/O error: {0}")]
    IoError(String),

    /// Filesystem failure propagated as-is
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Map an I/O error to `Permission` when it is a permission failure,
    /// keeping the target path in the message.
    pub fn from_io_write(err: std::io::Error, target: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            Error::Permission(format!("{} is not writable: {}", target.display(), err))
        } else {
            Error::IoError(format!("failed to write {}: {}", target.display(), err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_permission_mapping() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let mapped = Error::from_io_write(err, std::path::Path::new("/usr/local/bin"));
        assert!(matches!(mapped, Error::Permission(_)));
        assert!(mapped.to_string().contains("/usr/local/bin"));
    }

    #[test]
    fn test_other_io_mapping() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let mapped = Error::from_io_write(err, std::path::Path::new("/tmp/x"));
        assert!(matches!(mapped, Error::IoError(_)));
    }

    #[test]
    fn test_checksum_display() {
        let err = Error::ChecksumMismatch {
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected aa"));
        assert!(msg.contains("got bb"));
    }
}
