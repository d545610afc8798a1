//! Chunking strategy implementations

mod section;
mod splitter;

pub use section::SectionChunker;
pub use splitter::{overlap_snippet, TextSplitter, OVERLAP_MARKER};
