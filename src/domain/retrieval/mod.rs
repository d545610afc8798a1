//! Retrieval domain: chunk storage contract and re-ranking

pub mod ranking;
pub mod store;

pub use ranking::{apply_critical_boost, candidate_limit, DEFAULT_CRITICAL_BOOST};
pub use store::{
    ChunkStore, PropertyStats, ReplaceResult, RetrievedChunk, SearchQuery, IMPORTANT_MARKER,
};

#[cfg(test)]
pub use store::MockChunkStore;
