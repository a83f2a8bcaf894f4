// src/fetch.rs

//! Archive fetch service
//!
//! Wraps reqwest's blocking client with bounded retries for transport
//! failures, streaming downloads through a temp file with an atomic rename,
//! and SHA-256 verification against the formula's declared checksum.
//!
//! A source URL naming an existing local file is copied into the cache
//! without any network I/O, which keeps offline installs and tests on the
//! same code path as real downloads.

use crate::error::{Error, Result};
use crate::formula::Formula;
use crate::hash;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum retry attempts for failed downloads
const MAX_RETRIES: u32 = 3;

/// Retry delay in milliseconds
const RETRY_DELAY_MS: u64 = 1000;

/// Buffer size for streaming downloads (8 KB)
const STREAM_BUFFER_SIZE: usize = 8192;

/// Stream an HTTP response body to a file, optionally tracking progress
fn stream_response_to_file(
    mut response: reqwest::blocking::Response,
    file: &mut File,
    total_size: u64,
    progress_bar: Option<&ProgressBar>,
    display_name: &str,
) -> Result<u64> {
    if let Some(pb) = progress_bar {
        if total_size > 0 {
            pb.set_length(total_size);
            pb.set_message(display_name.to_string());
        } else {
            pb.set_message(format!("{} (unknown size)", display_name));
        }
    }

    let mut downloaded: u64 = 0;
    let mut buffer = [0u8; STREAM_BUFFER_SIZE];

    loop {
        let bytes_read = response
            .read(&mut buffer)
            .map_err(|e| Error::IoError(format!("Failed to read response: {e}")))?;

        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])
            .map_err(|e| Error::IoError(format!("Failed to write data: {e}")))?;

        downloaded += bytes_read as u64;

        if let Some(pb) = progress_bar {
            pb.set_position(downloaded);
        }
    }

    Ok(downloaded)
}

/// Create a styled progress bar for archive downloads
pub fn create_progress_bar(name: &str) -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb.set_message(name.to_string());
    pb
}

/// HTTP client wrapper with retry support
pub struct ArchiveClient {
    client: Client,
    max_retries: u32,
}

impl ArchiveClient {
    /// Create a new archive client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Download a URL to the given path with retry support
    ///
    /// The body is streamed to `<dest>.tmp` and atomically renamed into
    /// place, so a partial download never appears under the final name.
    pub fn download_file(
        &self,
        url: &str,
        dest_path: &Path,
        display_name: &str,
        progress_bar: Option<&ProgressBar>,
    ) -> Result<()> {
        info!("Downloading {} to {}", url, dest_path.display());

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::IoError(format!("Failed to create directory {}: {e}", parent.display()))
            })?;
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.get(url).send() {
                Ok(response) => {
                    if !response.status().is_success() {
                        return Err(Error::Download(format!(
                            "HTTP {} from {}",
                            response.status(),
                            url
                        )));
                    }

                    let total_size = response.content_length().unwrap_or(0);

                    let temp_path = dest_path.with_extension("tmp");
                    let mut file = File::create(&temp_path).map_err(|e| {
                        Error::IoError(format!("Failed to create file {}: {e}", temp_path.display()))
                    })?;

                    let downloaded = stream_response_to_file(
                        response,
                        &mut file,
                        total_size,
                        progress_bar,
                        display_name,
                    )?;

                    if let Some(pb) = progress_bar {
                        pb.finish_with_message(format!("{} [done]", display_name));
                    }

                    debug!("Downloaded {} bytes", downloaded);

                    fs::rename(&temp_path, dest_path).map_err(|e| {
                        Error::IoError(format!(
                            "Failed to move {} to {}: {e}",
                            temp_path.display(),
                            dest_path.display()
                        ))
                    })?;

                    return Ok(());
                }
                Err(e) => {
                    if attempt >= self.max_retries {
                        return Err(Error::Download(format!(
                            "Failed to download after {attempt} attempts: {e}"
                        )));
                    }
                    warn!("Download attempt {} failed: {}, retrying...", attempt, e);
                    std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64));
                }
            }
        }
    }

    /// Fetch a source URL into the cache, verifying its checksum
    ///
    /// Local file paths are copied into the cache instead of downloaded.
    /// When the formula carries a non-empty `sha256`, a mismatching archive
    /// is removed before the error is returned; an empty `sha256` skips
    /// verification entirely and logs the risk.
    pub fn fetch_and_verify(
        &self,
        formula: &Formula,
        cache_dir: &Path,
        progress_bar: Option<&ProgressBar>,
    ) -> Result<PathBuf> {
        let dest_path = cache_dir.join(formula.archive_filename());
        let url = &formula.source.url;

        // Reuse a cached archive only when it still verifies
        if dest_path.exists() && !formula.is_unverified() {
            if hash::verify_file(&dest_path, &formula.source.sha256).is_ok() {
                info!("Using cached archive {}", dest_path.display());
                return Ok(dest_path);
            }
            debug!("Cached archive failed verification, refetching");
            let _ = fs::remove_file(&dest_path);
        }

        let source = Path::new(url);
        if source.is_file() {
            info!("Using local archive: {}", url);
            copy_local_archive(source, &dest_path)?;
        } else {
            self.download_file(url, &dest_path, &formula.package.name, progress_bar)?;
        }

        if formula.is_unverified() {
            warn!(
                "Formula '{}' has no sha256: installing archive unverified",
                formula.package.name
            );
            return Ok(dest_path);
        }

        if let Err(e) = hash::verify_file(&dest_path, &formula.source.sha256) {
            let _ = fs::remove_file(&dest_path);
            return Err(Error::ChecksumMismatch {
                expected: e.expected,
                actual: e.actual,
            });
        }

        debug!("Checksum verified: {}", formula.source.sha256);
        Ok(dest_path)
    }
}

/// Copy a local source archive into the cache via a temp name
fn copy_local_archive(source: &Path, dest_path: &Path) -> Result<()> {
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::IoError(format!("Failed to create directory {}: {e}", parent.display()))
        })?;
    }

    let temp_path = dest_path.with_extension("tmp");
    fs::copy(source, &temp_path).map_err(|e| {
        Error::IoError(format!(
            "Failed to copy {} to cache: {e}",
            source.display()
        ))
    })?;
    fs::rename(&temp_path, dest_path).map_err(|e| {
        Error::IoError(format!("Failed to move archive into cache: {e}"))
    })?;

    Ok(())
}
