// src/resolver.rs

//! Dependency probing
//!
//! A formula's `depends_on` entries name executables that must be reachable
//! before install. The [`InstallProbe`] trait is the seam between the install
//! pipeline and the environment; the production [`PathProbe`] answers from
//! the configured binary directory and the caller's `PATH`.
//!
//! Recursive installs of dependencies that themselves have formulas are
//! driven by the installer, not here; the probe only answers "is this name
//! already present".

use std::path::PathBuf;

/// Answers whether a named package is already installed
pub trait InstallProbe {
    fn is_installed(&self, name: &str) -> bool;
}

/// Probe that checks the binary directory and `PATH` for an executable
pub struct PathProbe {
    /// Directories checked before falling back to `PATH`
    bin_dirs: Vec<PathBuf>,
}

impl PathProbe {
    /// Create a probe for the given binary directories
    pub fn new(bin_dirs: Vec<PathBuf>) -> Self {
        Self { bin_dirs }
    }
}

impl InstallProbe for PathProbe {
    fn is_installed(&self, name: &str) -> bool {
        for dir in &self.bin_dirs {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return true;
            }
        }
        which::which(name).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_finds_file_in_bin_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fzf"), b"#!/bin/sh\n").unwrap();

        let probe = PathProbe::new(vec![dir.path().to_path_buf()]);
        assert!(probe.is_installed("fzf"));
    }

    #[test]
    fn test_probe_finds_path_executable() {
        let probe = PathProbe::new(vec![]);
        // `sh` exists on any unix host running the tests
        assert!(probe.is_installed("sh"));
    }

    #[test]
    fn test_probe_misses_unknown_name() {
        let dir = tempfile::tempdir().unwrap();
        let probe = PathProbe::new(vec![dir.path().to_path_buf()]);
        assert!(!probe.is_installed("definitely-not-a-real-tool-9431"));
    }

    #[test]
    fn test_probe_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("fzf")).unwrap();

        let probe = PathProbe::new(vec![dir.path().to_path_buf()]);
        assert!(!probe.is_installed("fzf"));
    }
}
