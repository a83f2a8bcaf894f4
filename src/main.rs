// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Install {
            name,
            formula_dir,
            bin_dir,
            cache_dir,
            skip_test,
            force,
        } => commands::cmd_install(&name, formula_dir, bin_dir, cache_dir, skip_test, force),
        Commands::Test {
            name,
            formula_dir,
            bin_dir,
            cache_dir,
        } => commands::cmd_test(&name, formula_dir, bin_dir, cache_dir),
        Commands::Fetch {
            name,
            formula_dir,
            bin_dir,
            cache_dir,
        } => commands::cmd_fetch(&name, formula_dir, bin_dir, cache_dir),
        Commands::List {
            formula_dir,
            bin_dir,
            cache_dir,
        } => commands::cmd_list(formula_dir, bin_dir, cache_dir),
        Commands::Validate { path } => commands::cmd_validate(&path),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
