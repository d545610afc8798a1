//! HTTP request and response types

pub mod error;
pub mod ingestion;
pub mod json;
pub mod retrieval;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use ingestion::{
    ChunkRequest, ChunkResponse, ChunkStageResponse, IngestionCreatedResponse, ProgressResponse,
    IngestionStatusResponse,
};
pub use json::Json;
pub use retrieval::{QueryResponse, QueryResult};
