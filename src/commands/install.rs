// src/commands/install.rs
//! Formula install command

use anyhow::{Context, Result};
use formulary::install::{InstallOptions, Installer};
use std::path::PathBuf;
use tracing::info;

/// Install a formula by name
pub fn cmd_install(
    name: &str,
    formula_dir: Option<PathBuf>,
    bin_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    skip_test: bool,
    force: bool,
) -> Result<()> {
    info!("Installing formula: {}", name);

    let config = super::load_config(formula_dir, bin_dir, cache_dir)
        .context("Failed to resolve configuration")?;
    let installer = Installer::new(config).context("Failed to create installer")?;

    let options = InstallOptions {
        skip_test,
        force,
        progress: true,
    };

    let installed = installer
        .install(name, &options)
        .with_context(|| format!("Failed to install '{}'", name))?;

    println!("Installed {} -> {}", name, installed.display());
    Ok(())
}
