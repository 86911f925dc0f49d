//! CLI module for the relevance workbench
//!
//! Subcommands:
//! - `serve`: HTTP API for the creation screens
//! - `templates`: print the experiment templates
//! - `preview`: check an NDJSON query upload
//! - `create`: submit a draft file to the configured backend

pub mod create;
pub mod preview;
pub mod serve;
pub mod templates;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Relevance workbench - Create query sets, search configurations, judgments and experiments
#[derive(Parser)]
#[command(name = "relevance-workbench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve,

    /// List the experiment templates
    Templates,

    /// Parse an NDJSON query upload and show its preview
    Preview(preview::PreviewArgs),

    /// Validate a draft and submit it to the configured backend
    Create(create::CreateArgs),
}

/// Load `.env`, the layered configuration and the log subscriber
fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);
    config
}
