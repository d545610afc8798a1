//! Document ingestion infrastructure
//!
//! Chunking and in-memory job tracking.

pub mod chunkers;
pub mod in_memory_repository;

pub use chunkers::{SectionChunker, TextSplitter};
pub use in_memory_repository::InMemoryIngestionJobRepository;
