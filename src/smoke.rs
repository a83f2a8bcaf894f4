// src/smoke.rs

//! Post-install smoke test
//!
//! Runs the installed file with a single `--help` argument in a child
//! process. The check passes only on a zero exit status; nonzero exit,
//! launch failure, a missing executable, and a hung child all count as
//! smoke-test failures. stdin is nulled to prevent interactive hangs and
//! output is captured for the log.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, info, warn};
use wait_timeout::ChildExt;

/// Default timeout for the smoke-test child process (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Run `<executable> --help` and require a zero exit status
pub fn run_help_check(executable: &Path) -> Result<()> {
    run_help_check_with_timeout(executable, DEFAULT_TIMEOUT)
}

/// Run the `--help` check with a custom timeout
pub fn run_help_check_with_timeout(executable: &Path, timeout: Duration) -> Result<()> {
    info!("Smoke testing {} --help", executable.display());

    let mut child = Command::new(executable)
        .arg("--help")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            Error::SmokeTestFailure(format!(
                "failed to launch {}: {}",
                executable.display(),
                e
            ))
        })?;

    match child.wait_timeout(timeout)? {
        Some(status) => {
            let output = child.wait_with_output()?;
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);

            for line in stdout.lines() {
                debug!("[help] {}", line);
            }
            for line in stderr.lines() {
                warn!("[help] {}", line);
            }

            if status.success() {
                info!("Smoke test passed for {}", executable.display());
                Ok(())
            } else {
                let code = status.code().unwrap_or(-1);
                Err(Error::SmokeTestFailure(format!(
                    "{} --help exited with status {}",
                    executable.display(),
                    code
                )))
            }
        }
        None => {
            let _ = child.kill();
            Err(Error::SmokeTestFailure(format!(
                "{} --help timed out after {} seconds",
                executable.display(),
                timeout.as_secs()
            )))
        }
    }
}
