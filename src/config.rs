// src/config.rs

//! Tool configuration: formula, binary, and cache directories
//!
//! Resolution order for each directory: CLI flag, environment variable
//! (`FORMULARY_FORMULA_DIR`, `FORMULARY_BIN_DIR`, `FORMULARY_CACHE_DIR`),
//! optional config file (`<config dir>/formulary/config.toml`), platform
//! default.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories the tool operates on
#[derive(Debug, Clone)]
pub struct Config {
    /// Where formula TOML files live
    pub formula_dir: PathBuf,
    /// Install target for executables
    pub bin_dir: PathBuf,
    /// Downloaded archives
    pub cache_dir: PathBuf,
}

/// Optional overrides parsed from the config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    formula_dir: Option<PathBuf>,
    #[serde(default)]
    bin_dir: Option<PathBuf>,
    #[serde(default)]
    cache_dir: Option<PathBuf>,
}

/// Per-command directory overrides from CLI flags
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub formula_dir: Option<PathBuf>,
    pub bin_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Resolve the effective configuration
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let file = load_config_file()?;

        let formula_dir = resolve_dir(
            overrides.formula_dir.clone(),
            "FORMULARY_FORMULA_DIR",
            file.formula_dir,
            default_formula_dir,
        )?;
        let bin_dir = resolve_dir(
            overrides.bin_dir.clone(),
            "FORMULARY_BIN_DIR",
            file.bin_dir,
            default_bin_dir,
        )?;
        let cache_dir = resolve_dir(
            overrides.cache_dir.clone(),
            "FORMULARY_CACHE_DIR",
            file.cache_dir,
            default_cache_dir,
        )?;

        debug!(
            "Config: formulas={} bin={} cache={}",
            formula_dir.display(),
            bin_dir.display(),
            cache_dir.display()
        );

        Ok(Self {
            formula_dir,
            bin_dir,
            cache_dir,
        })
    }

    /// Path of the formula file for a package name
    pub fn formula_path(&self, name: &str) -> PathBuf {
        self.formula_dir.join(format!("{}.toml", name))
    }
}

fn resolve_dir(
    flag: Option<PathBuf>,
    env_var: &str,
    from_file: Option<PathBuf>,
    default: fn() -> Result<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Ok(dir) = std::env::var(env_var) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    if let Some(dir) = from_file {
        return Ok(dir);
    }
    default()
}

fn load_config_file() -> Result<ConfigFile> {
    let path = match config_file_path() {
        Some(p) => p,
        None => return Ok(ConfigFile::default()),
    };
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    parse_config_file(&path)
}

fn parse_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read config {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Parse(format!("Invalid config file {}: {}", path.display(), e)))
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("formulary").join("config.toml"))
}

fn default_formula_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("formulary").join("formulae"))
        .ok_or_else(|| Error::NotFound("No config directory on this platform".to_string()))
}

fn default_bin_dir() -> Result<PathBuf> {
    if let Some(dir) = dirs::executable_dir() {
        return Ok(dir);
    }
    dirs::home_dir()
        .map(|d| d.join(".local").join("bin"))
        .ok_or_else(|| Error::NotFound("No home directory on this platform".to_string()))
}

fn default_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|d| d.join("formulary"))
        .ok_or_else(|| Error::NotFound("No cache directory on this platform".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_override_wins() {
        let overrides = Overrides {
            formula_dir: Some(PathBuf::from("/custom/formulae")),
            bin_dir: Some(PathBuf::from("/custom/bin")),
            cache_dir: Some(PathBuf::from("/custom/cache")),
        };
        let config = Config::load(&overrides).unwrap();
        assert_eq!(config.formula_dir, PathBuf::from("/custom/formulae"));
        assert_eq!(config.bin_dir, PathBuf::from("/custom/bin"));
        assert_eq!(config.cache_dir, PathBuf::from("/custom/cache"));
    }

    #[test]
    fn test_formula_path() {
        let config = Config {
            formula_dir: PathBuf::from("/f"),
            bin_dir: PathBuf::from("/b"),
            cache_dir: PathBuf::from("/c"),
        };
        assert_eq!(
            config.formula_path("git-grob"),
            PathBuf::from("/f/git-grob.toml")
        );
    }

    #[test]
    fn test_parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "bin_dir = \"/opt/tools/bin\"\n").unwrap();

        let file = parse_config_file(&path).unwrap();
        assert_eq!(file.bin_dir, Some(PathBuf::from("/opt/tools/bin")));
        assert!(file.formula_dir.is_none());
    }

    #[test]
    fn test_parse_bad_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "bin_dir = [not toml").unwrap();
        assert!(parse_config_file(&path).is_err());
    }
}
