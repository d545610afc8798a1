//! CLI module
//!
//! Subcommands:
//! - `serve`: HTTP API server
//! - `chunk`: chunk a parsed document file and print the chunks as JSON

pub mod chunk;
pub mod serve;

use clap::{Parser, Subcommand};

/// Property knowledge ingestion - section-aware chunking and retrieval
#[derive(Parser)]
#[command(name = "property-knowledge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Chunk a parsed document JSON file
    Chunk(chunk::ChunkArgs),
}
