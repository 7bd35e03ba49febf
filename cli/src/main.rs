//! # finda CLI
//!
//! Command-line interface for finda - an interactive file search assistant.
//!
//! ## Usage
//!
//! - `finda` - Start an interactive search session
//! - `finda "find the annual report"` - Run a single query and exit
//!
//! Queries are handed to an LLM orchestrator that searches a remote file
//! index; results can be selected by number and opened in the default
//! application.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod opener;

use commands::{interactive_command, run_command};
use config::CliConfigLoader;

/// finda - an interactive file search assistant
#[derive(Parser)]
#[command(name = "finda")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search a remote file index by keyword and open the results")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API key override for the LLM provider
    #[arg(long)]
    api_key: Option<String>,

    /// Base URL override for the LLM provider
    #[arg(long)]
    base_url: Option<String>,

    /// Model name override
    #[arg(long)]
    model: Option<String>,

    /// Resource service endpoint override
    #[arg(long)]
    endpoint: Option<String>,

    /// Real documents root the virtual root maps onto
    #[arg(long)]
    docs_root: Option<String>,

    /// Virtual-root marker used in result paths
    #[arg(long)]
    virtual_root: Option<String>,

    /// Write a JSON session transcript to this file
    #[arg(long)]
    transcript_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// The query to run (if provided, runs one query and exits)
    query: Option<String>,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(api_key) = &cli.api_key {
        loader = loader.with_api_key_override(api_key.clone());
    }

    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url_override(base_url.clone());
    }

    if let Some(model) = &cli.model {
        loader = loader.with_model_override(model.clone());
    }

    if let Some(endpoint) = &cli.endpoint {
        loader = loader.with_endpoint_override(endpoint.clone());
    }

    if let Some(docs_root) = &cli.docs_root {
        loader = loader.with_docs_root_override(docs_root.clone());
    }

    if let Some(virtual_root) = &cli.virtual_root {
        loader = loader.with_virtual_root_override(virtual_root.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config_loader = build_config_loader(&cli);

    match cli.query {
        Some(query) => run_command(query, config_loader).await,
        None => interactive_command(config_loader, cli.transcript_file).await,
    }
}
