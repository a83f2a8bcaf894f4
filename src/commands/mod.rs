// src/commands/mod.rs
//! Command handlers for the formulary CLI

mod fetch;
mod install;
mod list;
mod smoke;
mod validate;

pub use fetch::cmd_fetch;
pub use install::cmd_install;
pub use list::cmd_list;
pub use smoke::cmd_test;
pub use validate::cmd_validate;

use formulary::config::{Config, Overrides};
use formulary::Result;
use std::path::PathBuf;

/// Build the effective configuration from CLI directory flags
pub fn load_config(
    formula_dir: Option<PathBuf>,
    bin_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
) -> Result<Config> {
    Config::load(&Overrides {
        formula_dir,
        bin_dir,
        cache_dir,
    })
}
