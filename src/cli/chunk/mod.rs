//! Chunk command - chunks a parsed document file and prints the chunks

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::document::ParsedDocument;
use crate::domain::ingestion::{ChunkingStrategy, DocumentChunk};
use crate::infrastructure::ingestion::SectionChunker;
use crate::infrastructure::logging;

/// Arguments for the chunk command
#[derive(Args, Clone, Debug)]
pub struct ChunkArgs {
    /// Parsed document JSON file
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub property_id: String,

    #[arg(long)]
    pub ingestion_id: String,

    /// Target chunk size in characters (overrides config)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap in characters (overrides config)
    #[arg(long)]
    pub chunk_overlap: Option<usize>,
}

/// Run the chunk command
pub fn run(args: ChunkArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let chunks = chunk_file(&args, &config)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &chunks)?;
    writeln!(stdout)?;

    Ok(())
}

fn chunk_file(args: &ChunkArgs, config: &AppConfig) -> anyhow::Result<Vec<DocumentChunk>> {
    let document = read_document(&args.input)?;

    let chunker = SectionChunker::from_requested(
        args.chunk_size.unwrap_or(config.chunking.chunk_size),
        args.chunk_overlap.unwrap_or(config.chunking.chunk_overlap),
    );

    let chunks = chunker.chunk_document(&document, &args.property_id, &args.ingestion_id);

    info!(
        input = %args.input.display(),
        sections = document.sections.len(),
        chunks = chunks.len(),
        "Chunked document"
    );

    Ok(chunks)
}

fn read_document(path: &Path) -> anyhow::Result<ParsedDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {} as a parsed document", path.display()))
}
