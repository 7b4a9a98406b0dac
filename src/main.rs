//! Pageroute - resolve content to URLs and URLs to content from the command line.

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use pageroute::config::RoutingConfig;
use pageroute::content::MemoryStore;
use pageroute::utils::plural_count;
use pageroute::{RoutingEngine, debug, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let engine = load_engine(&cli)?;

    match &cli.command {
        Commands::Generate { args } => cli::generate::run_generate(&engine, args),
        Commands::Match { url, json } => cli::inspect::run_match(&engine, url, *json),
        Commands::Params { page } => cli::inspect::run_params(&engine, *page),
        Commands::Route { page } => cli::inspect::run_route(&engine, *page),
        Commands::Conflicts { page } => cli::inspect::run_conflicts(&engine, *page),
    }
}

/// Build the engine from the config file (optional) and the site document.
fn load_engine(cli: &Cli) -> Result<RoutingEngine> {
    let config = if cli.config.exists() {
        RoutingConfig::from_path(&cli.config)?
    } else {
        debug!("config"; "{} not found, using defaults", cli.config.display());
        RoutingConfig::default()
    };

    let store = MemoryStore::from_path(&cli.site)?;
    debug!("site"; "loaded {} from {}", plural_count(store.len(), "record"), cli.site.display());

    Ok(RoutingEngine::build(&config, Arc::new(store))?)
}
