// src/commands/fetch.rs
//! Archive pre-fetch command

use anyhow::{Context, Result};
use formulary::install::Installer;
use std::path::PathBuf;

/// Fetch and verify a formula's archive without installing it
pub fn cmd_fetch(
    name: &str,
    formula_dir: Option<PathBuf>,
    bin_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(formula_dir, bin_dir, cache_dir)
        .context("Failed to resolve configuration")?;
    let installer = Installer::new(config).context("Failed to create installer")?;

    let cached = installer
        .fetch(name, true)
        .with_context(|| format!("Failed to fetch archive for '{}'", name))?;

    println!("Fetched {} -> {}", name, cached.display());
    Ok(())
}
