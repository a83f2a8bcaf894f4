// src/commands/smoke.rs
//! Post-install smoke-test command

use anyhow::{Context, Result};
use formulary::install::Installer;
use std::path::PathBuf;
use tracing::info;

/// Smoke-test an already installed formula
pub fn cmd_test(
    name: &str,
    formula_dir: Option<PathBuf>,
    bin_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
) -> Result<()> {
    info!("Smoke testing formula: {}", name);

    let config = super::load_config(formula_dir, bin_dir, cache_dir)
        .context("Failed to resolve configuration")?;
    let installer = Installer::new(config).context("Failed to create installer")?;

    let executable = installer
        .smoke_test(name)
        .with_context(|| format!("Smoke test failed for '{}'", name))?;

    println!("{} --help: ok", executable.display());
    Ok(())
}
