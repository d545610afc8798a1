//! Ingestion job repository trait

use async_trait::async_trait;

use super::job::{IngestionId, IngestionJob};
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for ingestion job persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IngestionJobRepository: Send + Sync {
    /// Get a job by ID
    async fn get(&self, id: &IngestionId) -> Result<Option<IngestionJob>, DomainError>;

    /// Create a new job
    async fn create(&self, job: IngestionJob) -> Result<IngestionJob, DomainError>;

    /// Update an existing job
    async fn update(&self, job: &IngestionJob) -> Result<IngestionJob, DomainError>;

    /// Count stored jobs
    async fn count(&self) -> Result<usize, DomainError>;
}
