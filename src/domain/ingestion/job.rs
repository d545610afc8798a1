//! Ingestion job entity
//!
//! The job is the single typed record of an ingestion run. Stages read and
//! write it through `IngestionJobRepository`, so no stage ever sees a raw
//! state envelope.

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Regex pattern for valid ingestion IDs: ing_{12 hex}
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ing_[a-f0-9]{12}$").unwrap());

/// Validated ingestion identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IngestionId(String);

impl IngestionId {
    /// Create a new validated ingestion ID
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if !ID_PATTERN.is_match(&id) {
            return Err(DomainError::invalid_id(format!(
                "Invalid ingestion ID '{}': must be in format ing_{{12 hex chars}}",
                id
            )));
        }

        Ok(Self(id))
    }

    /// Generate a new ingestion ID
    pub fn generate() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("ing_{}", &hex[..12]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IngestionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IngestionId> for String {
    fn from(id: IngestionId) -> Self {
        id.0
    }
}

impl fmt::Display for IngestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of an ingestion job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Pipeline stage, used to attribute errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStage {
    Discovery,
    Parsing,
    Chunking,
    Embedding,
    Storage,
}

impl fmt::Display for IngestionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery => write!(f, "discovery"),
            Self::Parsing => write!(f, "parsing"),
            Self::Chunking => write!(f, "chunking"),
            Self::Embedding => write!(f, "embedding"),
            Self::Storage => write!(f, "storage"),
        }
    }
}

/// Per-stage document counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionProgress {
    pub documents_discovered: usize,
    pub documents_parsed: usize,
    pub documents_chunked: usize,
    pub documents_embedded: usize,
    pub total_documents: usize,
}

impl IngestionProgress {
    /// Set the counter a stage reports
    ///
    /// Storage shares the embedded counter, since stored chunks are indexed
    /// for search as they are written.
    pub fn record(&mut self, stage: IngestionStage, count: usize) {
        match stage {
            IngestionStage::Discovery => self.documents_discovered = count,
            IngestionStage::Parsing => self.documents_parsed = count,
            IngestionStage::Chunking => self.documents_chunked = count,
            IngestionStage::Embedding | IngestionStage::Storage => {
                self.documents_embedded = count
            }
        }
    }
}

/// An ingestion run for one property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionJob {
    id: IngestionId,
    property_id: String,
    status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    notify_email: Option<String>,
    overwrite_existing: bool,
    progress: IngestionProgress,
    chunks_created: usize,
    errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_stage: Option<IngestionStage>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl IngestionJob {
    /// Create a new processing job
    pub fn new(property_id: impl Into<String>, total_documents: usize) -> Self {
        let now = Utc::now();

        Self {
            id: IngestionId::generate(),
            property_id: property_id.into(),
            status: JobStatus::Processing,
            notify_email: None,
            overwrite_existing: true,
            progress: IngestionProgress {
                total_documents,
                ..Default::default()
            },
            chunks_created: 0,
            errors: Vec::new(),
            failed_stage: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a job with a specific ID (for testing)
    pub fn with_id(mut self, id: IngestionId) -> Self {
        self.id = id;
        self
    }

    pub fn with_notify_email(mut self, email: impl Into<String>) -> Self {
        self.notify_email = Some(email.into());
        self
    }

    pub fn with_overwrite_existing(mut self, overwrite: bool) -> Self {
        self.overwrite_existing = overwrite;
        self
    }

    // Getters

    pub fn id(&self) -> &IngestionId {
        &self.id
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn notify_email(&self) -> Option<&str> {
        self.notify_email.as_deref()
    }

    pub fn overwrite_existing(&self) -> bool {
        self.overwrite_existing
    }

    pub fn progress(&self) -> &IngestionProgress {
        &self.progress
    }

    pub fn chunks_created(&self) -> usize {
        self.chunks_created
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn failed_stage(&self) -> Option<IngestionStage> {
        self.failed_stage
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    fn ensure_processing(&self, action: &str) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::validation(format!(
                "Ingestion job '{}' is {} and cannot {}",
                self.id, self.status, action
            )));
        }
        Ok(())
    }

    /// Record how many documents a stage has handled
    pub fn record_progress(
        &mut self,
        stage: IngestionStage,
        count: usize,
    ) -> Result<(), DomainError> {
        self.ensure_processing("record progress")?;
        self.progress.record(stage, count);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Append errors without changing the job status
    pub fn record_errors(&mut self, errors: Vec<String>) -> Result<(), DomainError> {
        self.ensure_processing("record errors")?;
        self.errors.extend(errors);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Record the result of the chunking stage
    pub fn record_chunking(
        &mut self,
        documents_chunked: usize,
        errors: Vec<String>,
    ) -> Result<(), DomainError> {
        self.ensure_processing("record chunking")?;
        self.progress.documents_chunked = documents_chunked;
        self.errors.extend(errors);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Mark the job completed with the number of stored chunks
    pub fn mark_completed(&mut self, chunks_created: usize) -> Result<(), DomainError> {
        self.ensure_processing("complete")?;
        self.status = JobStatus::Completed;
        self.chunks_created += chunks_created;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Mark the job failed at a stage, accumulating its errors
    pub fn mark_failed(
        &mut self,
        stage: IngestionStage,
        errors: Vec<String>,
    ) -> Result<(), DomainError> {
        self.ensure_processing("fail")?;
        self.status = JobStatus::Failed;
        self.failed_stage = Some(stage);
        self.errors.extend(errors);
        self.updated_at = Utc::now();
        Ok(())
    }
}
