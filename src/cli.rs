// src/cli.rs
//! CLI definitions for formulary
//!
//! All command-line interface definitions using clap. The command
//! implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "formulary")]
#[command(version)]
#[command(about = "Formula-driven installer for single-file tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install a formula: fetch, verify, unpack, place, smoke-test
    Install {
        /// Formula name (resolved in the formula directory)
        name: String,

        /// Directory containing formula files
        #[arg(long)]
        formula_dir: Option<PathBuf>,

        /// Directory executables are installed into
        #[arg(long)]
        bin_dir: Option<PathBuf>,

        /// Directory downloaded archives are cached in
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Skip the post-install --help check
        #[arg(long)]
        skip_test: bool,

        /// Replace an already installed file
        #[arg(long)]
        force: bool,
    },

    /// Smoke-test an installed formula (run it with --help)
    Test {
        /// Formula name
        name: String,

        /// Directory containing formula files
        #[arg(long)]
        formula_dir: Option<PathBuf>,

        /// Directory executables are installed into
        #[arg(long)]
        bin_dir: Option<PathBuf>,

        /// Directory downloaded archives are cached in
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// Download and verify a formula's archive without installing
    Fetch {
        /// Formula name
        name: String,

        /// Directory containing formula files
        #[arg(long)]
        formula_dir: Option<PathBuf>,

        /// Directory executables are installed into
        #[arg(long)]
        bin_dir: Option<PathBuf>,

        /// Directory downloaded archives are cached in
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// List formulas and their install status
    List {
        /// Directory containing formula files
        #[arg(long)]
        formula_dir: Option<PathBuf>,

        /// Directory executables are installed into
        #[arg(long)]
        bin_dir: Option<PathBuf>,

        /// Directory downloaded archives are cached in
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// Validate a formula file
    Validate {
        /// Path to the formula TOML file
        path: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
