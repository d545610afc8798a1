//! Ingestion pipeline request and result types

use serde::{Deserialize, Serialize};

use super::chunk::DocumentChunk;
use super::job::IngestionStage;
use crate::domain::document::{DocType, ParsedDocument};

/// A document source to ingest: a URL or a file reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default)]
    pub doc_type: DocType,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_overwrite() -> bool {
    true
}

impl DocumentSource {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            file_path: None,
            doc_type: DocType::default(),
            language: default_language(),
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            url: None,
            file_path: Some(path.into()),
            doc_type: DocType::default(),
            language: default_language(),
        }
    }

    pub fn with_doc_type(mut self, doc_type: DocType) -> Self {
        self.doc_type = doc_type;
        self
    }

    /// A source is usable when it names a URL or a file
    pub fn is_usable(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.url) || present(&self.file_path)
    }
}

/// Request to start an ingestion job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartIngestionRequest {
    pub property_id: String,
    pub sources: Vec<DocumentSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_email: Option<String>,
    #[serde(default = "default_overwrite")]
    pub overwrite_existing: bool,
}

impl StartIngestionRequest {
    pub fn new(property_id: impl Into<String>, sources: Vec<DocumentSource>) -> Self {
        Self {
            property_id: property_id.into(),
            sources,
            notify_email: None,
            overwrite_existing: true,
        }
    }

    pub fn with_notify_email(mut self, email: impl Into<String>) -> Self {
        self.notify_email = Some(email.into());
        self
    }
}

/// Parsed documents handed to the chunking stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkDocumentsRequest {
    pub parsed_documents: Vec<ParsedDocument>,
    /// Defaults to the job's setting when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite_existing: Option<bool>,
}

impl ChunkDocumentsRequest {
    pub fn new(parsed_documents: Vec<ParsedDocument>) -> Self {
        Self {
            parsed_documents,
            overwrite_existing: None,
        }
    }
}

/// Chunks produced for one ingestion run, plus per-document errors
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChunkBatch {
    pub chunks: Vec<DocumentChunk>,
    pub documents_chunked: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ChunkBatch {
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Errors reported by a pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageErrorReport {
    pub stage: IngestionStage,
    pub errors: Vec<String>,
}

/// Document count reported by a pipeline stage
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StageProgressReport {
    pub stage: IngestionStage,
    pub documents: usize,
}
