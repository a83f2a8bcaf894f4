// src/install.rs

//! Install pipeline
//!
//! Drives a formula through the strictly sequential steps: resolve
//! dependencies, fetch and verify the archive, unpack it, place the install
//! file into the binary directory, and smoke-test the result. Every step is
//! terminal on failure; there is no retry policy and no partial-install
//! recovery beyond removing the pipeline's own temp files.

use crate::archive;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::{create_progress_bar, ArchiveClient};
use crate::formula::{parse_formula_file, validate_formula, Formula};
use crate::resolver::{InstallProbe, PathProbe};
use crate::smoke;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Maximum depth for recursive dependency installs
const MAX_DEPENDENCY_DEPTH: usize = 10;

/// Knobs for a single install run
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Skip the post-install `--help` check
    pub skip_test: bool,
    /// Replace an already installed file
    pub force: bool,
    /// Show a download progress bar
    pub progress: bool,
}

/// Formula-driven installer
pub struct Installer {
    config: Config,
    client: ArchiveClient,
    probe: Box<dyn InstallProbe>,
}

impl Installer {
    /// Create an installer probing the configured binary directory and `PATH`
    pub fn new(config: Config) -> Result<Self> {
        let probe = Box::new(PathProbe::new(vec![config.bin_dir.clone()]));
        Self::with_probe(config, probe)
    }

    /// Create an installer with a custom install probe
    pub fn with_probe(config: Config, probe: Box<dyn InstallProbe>) -> Result<Self> {
        Ok(Self {
            client: ArchiveClient::new()?,
            config,
            probe,
        })
    }

    /// The effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load a formula by package name from the formula directory
    pub fn load_formula(&self, name: &str) -> Result<Formula> {
        let path = self.config.formula_path(name);
        if !path.exists() {
            return Err(Error::NotFound(format!(
                "No formula for '{}' in {}",
                name,
                self.config.formula_dir.display()
            )));
        }
        parse_formula_file(&path)
    }

    /// Install a formula by name, returning the installed file path
    pub fn install(&self, name: &str, options: &InstallOptions) -> Result<PathBuf> {
        self.install_depth(name, options, 0)
    }

    fn install_depth(
        &self,
        name: &str,
        options: &InstallOptions,
        depth: usize,
    ) -> Result<PathBuf> {
        let formula = self.load_formula(name)?;
        for warning in validate_formula(&formula)? {
            warn!("{}: {}", name, warning);
        }

        info!(
            "Installing {} ({})",
            formula.package.name, formula.package.desc
        );

        // Dependencies are settled before any fetch happens
        self.resolve_dependencies(&formula, options, depth)?;

        let progress = options.progress.then(|| create_progress_bar(name));
        let archive_path =
            self.client
                .fetch_and_verify(&formula, &self.config.cache_dir, progress.as_ref())?;

        let staging = TempDir::new()?;
        let root = archive::unpack(&archive_path, staging.path())?;

        let installed = self.place_file(&formula, &root, options.force)?;

        if options.skip_test {
            debug!("Skipping smoke test for {}", name);
        } else {
            smoke::run_help_check(&installed)?;
        }

        info!("Installed {} to {}", name, installed.display());
        Ok(installed)
    }

    /// Ensure every `depends_on` entry is present, installing from formulas
    /// where possible
    fn resolve_dependencies(
        &self,
        formula: &Formula,
        options: &InstallOptions,
        depth: usize,
    ) -> Result<()> {
        for dep in formula.dependencies() {
            if self.probe.is_installed(dep) {
                debug!("Dependency '{}' already installed", dep);
                continue;
            }

            if !self.config.formula_path(dep).exists() {
                return Err(Error::MissingDependency {
                    package: formula.package.name.clone(),
                    dependency: dep.clone(),
                    reason: "not installed and no formula available".to_string(),
                });
            }

            if depth + 1 > MAX_DEPENDENCY_DEPTH {
                return Err(Error::MissingDependency {
                    package: formula.package.name.clone(),
                    dependency: dep.clone(),
                    reason: format!(
                        "dependency chain deeper than {} (possible cycle)",
                        MAX_DEPENDENCY_DEPTH
                    ),
                });
            }

            info!("Installing dependency '{}' for '{}'", dep, formula.package.name);
            self.install_depth(dep, options, depth + 1)?;
        }

        Ok(())
    }

    /// Copy the install file from the archive root into the binary directory
    ///
    /// Written under a temp name and atomically renamed, so a failed install
    /// leaves nothing under the final name. The source's permission bits are
    /// preserved and the executable bits are guaranteed.
    fn place_file(&self, formula: &Formula, root: &Path, force: bool) -> Result<PathBuf> {
        let file = &formula.install.file;
        let source = root.join(file);

        let metadata = fs::metadata(&source).map_err(|_| Error::FileNotFoundInArchive {
            file: file.clone(),
            root: root.to_path_buf(),
        })?;
        if !metadata.is_file() {
            return Err(Error::FileNotFoundInArchive {
                file: file.clone(),
                root: root.to_path_buf(),
            });
        }

        fs::create_dir_all(&self.config.bin_dir)
            .map_err(|e| Error::from_io_write(e, &self.config.bin_dir))?;

        let target = self.config.bin_dir.join(file);
        if target.exists() && !force {
            return Err(Error::IoError(format!(
                "{} already exists (use --force to reinstall)",
                target.display()
            )));
        }

        let temp_path = self.config.bin_dir.join(format!(".{}.tmp", file));
        if let Err(e) = fs::copy(&source, &temp_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::from_io_write(e, &self.config.bin_dir));
        }

        let mut perms = metadata.permissions();
        perms.set_mode(perms.mode() | 0o111);
        if let Err(e) = fs::set_permissions(&temp_path, perms) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::from_io_write(e, &temp_path));
        }

        if let Err(e) = fs::rename(&temp_path, &target) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::from_io_write(e, &target));
        }

        Ok(target)
    }

    /// Smoke-test an already installed formula
    pub fn smoke_test(&self, name: &str) -> Result<PathBuf> {
        let formula = self.load_formula(name)?;
        let installed = self.config.bin_dir.join(&formula.install.file);
        smoke::run_help_check(&installed)?;
        Ok(installed)
    }

    /// Fetch and verify a formula's archive without installing it
    pub fn fetch(&self, name: &str, progress: bool) -> Result<PathBuf> {
        let formula = self.load_formula(name)?;
        for warning in validate_formula(&formula)? {
            warn!("{}: {}", name, warning);
        }
        let pb = progress.then(|| create_progress_bar(name));
        self.client
            .fetch_and_verify(&formula, &self.config.cache_dir, pb.as_ref())
    }
}
