//! In-memory ingestion job repository implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::error::DomainError;
use crate::domain::ingestion::{IngestionId, IngestionJob, IngestionJobRepository};

/// In-memory implementation of IngestionJobRepository
#[derive(Debug)]
pub struct InMemoryIngestionJobRepository {
    jobs: Arc<RwLock<HashMap<String, IngestionJob>>>,
}

impl InMemoryIngestionJobRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryIngestionJobRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IngestionJobRepository for InMemoryIngestionJobRepository {
    async fn get(&self, id: &IngestionId) -> Result<Option<IngestionJob>, DomainError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.get(id.as_str()).cloned())
    }

    async fn create(&self, job: IngestionJob) -> Result<IngestionJob, DomainError> {
        let mut jobs = self.jobs.write().await;
        let id = job.id().as_str().to_string();

        if jobs.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "Ingestion job '{}' already exists",
                job.id()
            )));
        }

        jobs.insert(id, job.clone());
        Ok(job)
    }

    async fn update(&self, job: &IngestionJob) -> Result<IngestionJob, DomainError> {
        let mut jobs = self.jobs.write().await;
        let id = job.id().as_str().to_string();

        if !jobs.contains_key(&id) {
            return Err(DomainError::not_found(format!("Ingestion job '{}'", job.id())));
        }

        jobs.insert(id, job.clone());
        Ok(job.clone())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.jobs.read().await.len())
    }
}
