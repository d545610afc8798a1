//! Infrastructure layer - Chunking, storage and service implementations

pub mod ingestion;
pub mod logging;
pub mod retrieval;
pub mod services;
