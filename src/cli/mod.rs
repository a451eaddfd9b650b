//! CLI module for the Workspace Agent API
//!
//! Subcommands:
//! - `serve`: run the HTTP server (default)
//! - `generate-key`: print a new API key for seed files or the bootstrap setting

pub mod keys;
pub mod serve;

use clap::{Parser, Subcommand};

/// Workspace Agent API - projects and features for automation clients
#[derive(Parser)]
#[command(name = "workspace-agent-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Generate a new API key and print it with its lookup prefix
    GenerateKey(keys::GenerateKeyArgs),
}
