//! CLI module for Lesson Planner
//!
//! Subcommands:
//! - `serve`: run the HTTP API
//! - `generate`: run one generation and print the result
//! - `draft`: convert a saved suggestion into form-ready text
//! - `token`: issue a bearer token for local testing

pub mod draft;
pub mod generate;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Lesson Planner - AI-assisted lesson planning
#[derive(Parser)]
#[command(name = "lesson-planner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Generate one lesson plan and print it as JSON
    Generate(generate::GenerateArgs),

    /// Convert a suggestion JSON document into the form draft
    Draft(draft::DraftArgs),

    /// Issue a bearer token for the given user
    Token(token::TokenArgs),
}

/// Load `.env`, configuration and logging shared by every command
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
