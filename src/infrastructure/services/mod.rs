//! Infrastructure services

mod ingestion_service;
mod retrieval_service;

pub use ingestion_service::{IngestionService, IngestionServiceTrait};
pub use retrieval_service::{
    RetrievalConfig, RetrievalRequest, RetrievalService, RetrievalServiceTrait,
    DEFAULT_RESULT_LIMIT, MAX_RESULT_LIMIT,
};
