//! Ingestion service driving a job through its pipeline stages

use std::fmt::{self, Debug};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::document::ParsedDocument;
use crate::domain::error::DomainError;
use crate::domain::ingestion::{
    chunk_id, validate_start_request, ChunkBatch, ChunkDocumentsRequest, ChunkingStrategy,
    DocumentChunk, IngestionId, IngestionJob, IngestionJobRepository, IngestionStage,
    StartIngestionRequest,
};
use crate::domain::outcome::Outcome;
use crate::domain::retrieval::ChunkStore;

/// Trait for the ingestion service (for dynamic dispatch in AppState)
#[async_trait]
pub trait IngestionServiceTrait: Send + Sync + Debug {
    /// Validate a request and create a processing job
    async fn start(&self, request: StartIngestionRequest) -> Result<IngestionJob, DomainError>;

    /// Chunk parsed documents for a job and store the result
    async fn chunk_documents(
        &self,
        id: &str,
        request: ChunkDocumentsRequest,
    ) -> Result<Outcome<ChunkBatch>, DomainError>;

    /// Record how many documents an upstream stage has handled
    async fn record_progress(
        &self,
        id: &str,
        stage: IngestionStage,
        count: usize,
    ) -> Result<IngestionJob, DomainError>;

    /// Fail a job at a stage with the stage's errors
    async fn record_stage_failure(
        &self,
        id: &str,
        stage: IngestionStage,
        errors: Vec<String>,
    ) -> Result<IngestionJob, DomainError>;

    /// Current state of a job
    async fn status(&self, id: &str) -> Result<IngestionJob, DomainError>;
}

/// Ingestion service implementation
pub struct IngestionService {
    chunker: Arc<dyn ChunkingStrategy>,
    jobs: Arc<dyn IngestionJobRepository>,
    store: Arc<dyn ChunkStore>,
}

impl Debug for IngestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionService")
            .field("chunker", &self.chunker.name())
            .field("config", &self.chunker.config())
            .finish_non_exhaustive()
    }
}

/// Chunks of one document, kept together for source replacement
struct DocumentChunks<'a> {
    document: &'a ParsedDocument,
    chunks: Vec<DocumentChunk>,
}

/// What the storage step managed to write before stopping
struct StoreReport {
    stored: usize,
    documents_stored: usize,
    failure: Option<String>,
}

fn document_label(document: &ParsedDocument) -> &str {
    match document.source() {
        "" => document.title.as_str(),
        source => source,
    }
}

impl IngestionService {
    pub fn new(
        chunker: Arc<dyn ChunkingStrategy>,
        jobs: Arc<dyn IngestionJobRepository>,
        store: Arc<dyn ChunkStore>,
    ) -> Self {
        Self {
            chunker,
            jobs,
            store,
        }
    }

    fn parse_id(&self, id: &str) -> Result<IngestionId, DomainError> {
        IngestionId::new(id)
    }

    async fn get_required(&self, id: &str) -> Result<IngestionJob, DomainError> {
        let job_id = self.parse_id(id)?;

        self.jobs
            .get(&job_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Ingestion job '{}'", id)))
    }

    /// Chunk every document, collecting per-document errors
    fn chunk_all<'a>(
        &self,
        job: &IngestionJob,
        documents: &'a [ParsedDocument],
    ) -> (Vec<DocumentChunks<'a>>, Vec<String>) {
        let mut groups = Vec::new();
        let mut errors = Vec::new();

        for document in documents {
            if let Err(e) = document.validate() {
                let label = document_label(document);
                warn!(
                    ingestion_id = %job.id(),
                    document = %label,
                    error = %e,
                    "Document could not be chunked"
                );
                errors.push(format!("Failed to chunk {}: {}", label, e));
                continue;
            }

            let chunks =
                self.chunker
                    .chunk_document(document, job.property_id(), job.id().as_str());

            debug!(
                ingestion_id = %job.id(),
                source = %document.source(),
                chunks = chunks.len(),
                "Chunked document"
            );

            groups.push(DocumentChunks { document, chunks });
        }

        (groups, errors)
    }

    /// Persist chunk groups in order, stopping at the first store error
    async fn store_groups(
        &self,
        job: &IngestionJob,
        groups: Vec<DocumentChunks<'_>>,
        overwrite: bool,
    ) -> StoreReport {
        let mut stored = 0;
        let mut documents_stored = 0;

        for group in groups {
            let label = document_label(group.document).to_string();

            let result = if overwrite {
                self.store
                    .replace_source(
                        job.property_id(),
                        &group.document.source_url,
                        &group.document.source_filename,
                        group.chunks,
                    )
                    .await
                    .map(|replaced| replaced.inserted)
            } else if group.chunks.is_empty() {
                Ok(0)
            } else {
                self.store.insert(group.chunks).await
            };

            match result {
                Ok(inserted) => {
                    stored += inserted;
                    documents_stored += 1;
                }
                Err(e) => {
                    return StoreReport {
                        stored,
                        documents_stored,
                        failure: Some(format!("Failed to store {}: {}", label, e)),
                    };
                }
            }
        }

        StoreReport {
            stored,
            documents_stored,
            failure: None,
        }
    }

    async fn fail(
        &self,
        mut job: IngestionJob,
        stage: IngestionStage,
        errors: Vec<String>,
    ) -> Result<IngestionJob, DomainError> {
        for e in &errors {
            error!(
                ingestion_id = %job.id(),
                property_id = %job.property_id(),
                stage = %stage,
                error = %e,
                "Ingestion stage error"
            );
        }

        job.mark_failed(stage, errors)?;
        self.jobs.update(&job).await
    }
}

/// Re-key chunk IDs so sequences run across all documents of a batch
fn sequence_ids(groups: &mut [DocumentChunks<'_>], property_id: &str, ingestion_id: &str) {
    let mut sequence = 0;

    for group in groups.iter_mut() {
        for chunk in &mut group.chunks {
            chunk.id = chunk_id(property_id, ingestion_id, sequence);
            sequence += 1;
        }
    }
}

#[async_trait]
impl IngestionServiceTrait for IngestionService {
    #[instrument(skip(self, request), fields(property_id = %request.property_id))]
    async fn start(&self, request: StartIngestionRequest) -> Result<IngestionJob, DomainError> {
        let sources = validate_start_request(&request)?;

        let mut job = IngestionJob::new(request.property_id, sources.len())
            .with_overwrite_existing(request.overwrite_existing);

        if let Some(email) = request.notify_email {
            job = job.with_notify_email(email);
        }

        let created = self.jobs.create(job).await?;

        info!(
            ingestion_id = %created.id(),
            documents_queued = sources.len(),
            "Started ingestion"
        );

        Ok(created)
    }

    #[instrument(skip(self, request), fields(documents = request.parsed_documents.len()))]
    async fn chunk_documents(
        &self,
        id: &str,
        request: ChunkDocumentsRequest,
    ) -> Result<Outcome<ChunkBatch>, DomainError> {
        let mut job = self.get_required(id).await?;

        if job.is_terminal() {
            return Err(DomainError::validation(format!(
                "Ingestion job '{}' is already {}",
                id,
                job.status()
            )));
        }

        let overwrite = request
            .overwrite_existing
            .unwrap_or_else(|| job.overwrite_existing());
        let total = request.parsed_documents.len();

        let (mut groups, errors) = self.chunk_all(&job, &request.parsed_documents);
        let documents_chunked = groups.len();
        let chunk_count: usize = groups.iter().map(|g| g.chunks.len()).sum();

        if chunk_count == 0 && !errors.is_empty() {
            let reason = format!("No chunks produced; {} of {} documents failed", errors.len(), total);
            self.fail(job, IngestionStage::Chunking, errors).await?;
            return Ok(Outcome::failed(reason));
        }

        sequence_ids(&mut groups, job.property_id(), job.id().as_str());
        let progress = *job.progress();
        if progress.documents_discovered < total {
            job.record_progress(IngestionStage::Discovery, total)?;
        }
        if progress.documents_parsed < total {
            job.record_progress(IngestionStage::Parsing, total)?;
        }
        job.record_chunking(documents_chunked, errors.clone())?;

        let group_sizes: Vec<usize> = groups.iter().map(|g| g.chunks.len()).collect();
        let mut chunks: Vec<DocumentChunk> = groups
            .iter()
            .flat_map(|g| g.chunks.iter().cloned())
            .collect();

        let report = self.store_groups(&job, groups, overwrite).await;
        let mut errors = errors;

        if let Some(failure) = report.failure {
            if report.stored == 0 {
                self.fail(job, IngestionStage::Storage, vec![failure.clone()])
                    .await?;
                return Ok(Outcome::failed(failure));
            }

            warn!(
                ingestion_id = %job.id(),
                stored = report.stored,
                error = %failure,
                "Storage stopped after a partial write"
            );
            job.record_errors(vec![failure.clone()])?;
            errors.push(failure);
        }

        let stored = report.stored;
        let stored_chunks: usize = group_sizes[..report.documents_stored].iter().sum();
        chunks.truncate(stored_chunks);

        job.record_progress(IngestionStage::Storage, stored)?;
        job.mark_completed(stored)?;
        self.jobs.update(&job).await?;

        info!(
            ingestion_id = %job.id(),
            property_id = %job.property_id(),
            documents_chunked = documents_chunked,
            chunks_created = stored,
            errors = errors.len(),
            "Chunking stage finished"
        );

        let failed = errors.len();
        let batch = ChunkBatch {
            chunks,
            documents_chunked,
            errors,
        };

        if failed == 0 {
            Ok(Outcome::Ok(batch))
        } else {
            Ok(Outcome::degraded(
                batch,
                format!("{} of {} documents were not fully ingested", failed, total),
            ))
        }
    }

    #[instrument(skip(self), fields(stage = %stage))]
    async fn record_progress(
        &self,
        id: &str,
        stage: IngestionStage,
        count: usize,
    ) -> Result<IngestionJob, DomainError> {
        let mut job = self.get_required(id).await?;
        job.record_progress(stage, count)?;

        debug!(ingestion_id = %job.id(), count = count, "Recorded stage progress");

        self.jobs.update(&job).await
    }

    #[instrument(skip(self, errors), fields(stage = %stage))]
    async fn record_stage_failure(
        &self,
        id: &str,
        stage: IngestionStage,
        errors: Vec<String>,
    ) -> Result<IngestionJob, DomainError> {
        let job = self.get_required(id).await?;
        self.fail(job, stage, errors).await
    }

    #[instrument(skip(self))]
    async fn status(&self, id: &str) -> Result<IngestionJob, DomainError> {
        self.get_required(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::ParsedSection;
    use crate::domain::ingestion::{
        ChunkingConfig, DocumentSource, JobStatus, MockChunkingStrategy,
        MockIngestionJobRepository,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::outcome::OutcomeKind;
    use crate::domain::retrieval::{
        MockChunkStore, PropertyStats, ReplaceResult, RetrievedChunk, SearchQuery,
    };
    use crate::infrastructure::ingestion::{InMemoryIngestionJobRepository, SectionChunker};
    use crate::infrastructure::retrieval::InMemoryChunkStore;

    struct Fixture {
        service: IngestionService,
        jobs: Arc<InMemoryIngestionJobRepository>,
        store: Arc<InMemoryChunkStore>,
    }

    fn fixture() -> Fixture {
        let jobs = Arc::new(InMemoryIngestionJobRepository::new());
        let store = Arc::new(InMemoryChunkStore::new());
        let service = IngestionService::new(
            Arc::new(SectionChunker::new(ChunkingConfig::default())),
            jobs.clone(),
            store.clone(),
        );

        Fixture {
            service,
            jobs,
            store,
        }
    }

    fn manual(filename: &str) -> ParsedDocument {
        ParsedDocument::new("House Manual")
            .with_source_filename(filename)
            .with_section(ParsedSection::new("Wifi", "Network beach-house, password sunshine.", 2))
            .with_section(ParsedSection::new("Fire Safety", "Extinguisher under the sink.", 2))
    }

    async fn started(fixture: &Fixture) -> IngestionJob {
        fixture
            .service
            .start(StartIngestionRequest::new(
                "villa-42",
                vec![DocumentSource::file("manual.md")],
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_start_creates_processing_job() {
        let fixture = fixture();
        let request = StartIngestionRequest::new(
            "villa-42",
            vec![
                DocumentSource::url("https://example.com/manual"),
                DocumentSource::file(" "),
            ],
        )
        .with_notify_email("host@example.com");

        let job = fixture.service.start(request).await.unwrap();

        assert_eq!(job.status(), JobStatus::Processing);
        assert_eq!(job.progress().total_documents, 1);
        assert_eq!(job.notify_email(), Some("host@example.com"));
        assert_eq!(fixture.jobs.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_start_rejects_unusable_sources() {
        let fixture = fixture();
        let request = StartIngestionRequest::new("villa-42", vec![DocumentSource::file("")]);

        let result = fixture.service.start(request).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(fixture.jobs.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_chunk_documents_completes_job() {
        let fixture = fixture();
        let job = started(&fixture).await;

        let outcome = fixture
            .service
            .chunk_documents(
                job.id().as_str(),
                ChunkDocumentsRequest::new(vec![manual("manual.md")]),
            )
            .await
            .unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::Ok);
        let batch = outcome.value().unwrap();
        assert_eq!(batch.chunks.len(), 2);
        assert_eq!(batch.documents_chunked, 1);
        assert!(batch.chunks[1].is_critical);

        let job = fixture.service.status(job.id().as_str()).await.unwrap();
        assert_eq!(job.status(), JobStatus::Completed);
        assert_eq!(job.chunks_created(), 2);
        assert_eq!(job.progress().documents_chunked, 1);
        assert_eq!(fixture.store.len().await, 2);
    }

    #[tokio::test]
    async fn test_chunk_ids_unique_across_documents() {
        let fixture = fixture();
        let job = started(&fixture).await;

        let outcome = fixture
            .service
            .chunk_documents(
                job.id().as_str(),
                ChunkDocumentsRequest::new(vec![manual("a.md"), manual("b.md")]),
            )
            .await
            .unwrap();

        let batch = outcome.into_value().unwrap();
        let ids: Vec<&str> = batch.chunks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
        assert!(ids[3].ends_with("_0003"));
        assert_eq!(batch.chunks[2].chunk_index, 0);
    }

    #[tokio::test]
    async fn test_partial_failure_is_degraded() {
        let fixture = fixture();
        let job = started(&fixture).await;
        let sourceless = ParsedDocument::new("Pool Guide")
            .with_section(ParsedSection::new("Pool", "Open 9 to 5.", 2));

        let outcome = fixture
            .service
            .chunk_documents(
                job.id().as_str(),
                ChunkDocumentsRequest::new(vec![manual("manual.md"), sourceless]),
            )
            .await
            .unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::Degraded);
        let batch = outcome.value().unwrap();
        assert_eq!(batch.errors.len(), 1);
        assert!(batch.errors[0].starts_with("Failed to chunk Pool Guide: "));

        let job = fixture.service.status(job.id().as_str()).await.unwrap();
        assert_eq!(job.status(), JobStatus::Completed);
        assert_eq!(job.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_total_failure_fails_job_at_chunking() {
        let fixture = fixture();
        let job = started(&fixture).await;
        let sourceless = ParsedDocument::new("Broken")
            .with_section(ParsedSection::new("Body", "text", 2));

        let outcome = fixture
            .service
            .chunk_documents(job.id().as_str(), ChunkDocumentsRequest::new(vec![sourceless]))
            .await
            .unwrap();

        assert!(outcome.is_failed());

        let job = fixture.service.status(job.id().as_str()).await.unwrap();
        assert_eq!(job.status(), JobStatus::Failed);
        assert_eq!(job.failed_stage(), Some(IngestionStage::Chunking));
        assert_eq!(job.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_documents_are_ok() {
        let fixture = fixture();
        let job = started(&fixture).await;
        let empty = ParsedDocument::new("Empty")
            .with_source_filename("empty.md")
            .with_section(ParsedSection::new("Blank", "   ", 1));

        let outcome = fixture
            .service
            .chunk_documents(job.id().as_str(), ChunkDocumentsRequest::new(vec![empty]))
            .await
            .unwrap();

        assert!(outcome.is_ok());
        assert!(outcome.value().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reingest_supersedes_source() {
        let fixture = fixture();

        for _ in 0..2 {
            let job = started(&fixture).await;
            fixture
                .service
                .chunk_documents(
                    job.id().as_str(),
                    ChunkDocumentsRequest::new(vec![manual("manual.md")]),
                )
                .await
                .unwrap();
        }

        assert_eq!(fixture.store.len().await, 2);
        let hits = fixture
            .store
            .search(&SearchQuery::new("villa-42", "password", 5))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_append_when_not_overwriting() {
        let fixture = fixture();

        for _ in 0..2 {
            let job = started(&fixture).await;
            let mut request = ChunkDocumentsRequest::new(vec![manual("manual.md")]);
            request.overwrite_existing = Some(false);
            fixture
                .service
                .chunk_documents(job.id().as_str(), request)
                .await
                .unwrap();
        }

        assert_eq!(fixture.store.len().await, 4);
    }

    #[tokio::test]
    async fn test_terminal_job_rejects_chunking() {
        let fixture = fixture();
        let job = started(&fixture).await;
        fixture
            .service
            .record_stage_failure(
                job.id().as_str(),
                IngestionStage::Parsing,
                vec!["unsupported format".to_string()],
            )
            .await
            .unwrap();

        let result = fixture
            .service
            .chunk_documents(job.id().as_str(), ChunkDocumentsRequest::new(vec![manual("m.md")]))
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_record_stage_failure() {
        let fixture = fixture();
        let job = started(&fixture).await;

        let failed = fixture
            .service
            .record_stage_failure(
                job.id().as_str(),
                IngestionStage::Embedding,
                vec!["rate limited".to_string(), "timeout".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(failed.status(), JobStatus::Failed);
        assert_eq!(failed.failed_stage(), Some(IngestionStage::Embedding));
        assert_eq!(failed.errors().len(), 2);
    }

    #[tokio::test]
    async fn test_status_unknown_and_invalid_ids() {
        let fixture = fixture();

        let missing = fixture.service.status("ing_0123456789ab").await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));

        let invalid = fixture.service.status("bogus").await;
        assert!(matches!(invalid, Err(DomainError::InvalidId { .. })));
    }

    fn mocked_service(
        job: &IngestionJob,
        expected_stage: Option<IngestionStage>,
        store: MockChunkStore,
    ) -> IngestionService {
        let mut jobs = MockIngestionJobRepository::new();
        let stored_job = job.clone();
        jobs.expect_get()
            .returning(move |_| Ok(Some(stored_job.clone())));
        jobs.expect_update()
            .withf(move |job| job.failed_stage() == expected_stage)
            .times(1)
            .returning(|job| Ok(job.clone()));

        IngestionService::new(
            Arc::new(MockChunkingStrategy::new()),
            Arc::new(jobs),
            Arc::new(store),
        )
    }

    #[tokio::test]
    async fn test_storage_error_fails_job_at_storage() {
        let job = IngestionJob::new("villa-42", 1);

        let mut store = MockChunkStore::new();
        store
            .expect_replace_source()
            .returning(|_, _, _, _| Err(DomainError::storage("vector store unavailable")));

        let service = mocked_service(&job, Some(IngestionStage::Storage), store);
        let outcome = service
            .chunk_documents(job.id().as_str(), ChunkDocumentsRequest::new(vec![manual("m.md")]))
            .await
            .unwrap();

        assert!(outcome.is_failed());
        assert!(outcome.reason().unwrap().contains("vector store unavailable"));
    }

    #[tokio::test]
    async fn test_partial_storage_is_degraded_with_stored_count() {
        let job = IngestionJob::new("villa-42", 2);

        let mut store = MockChunkStore::new();
        store
            .expect_replace_source()
            .withf(|_, _, filename, _| filename.to_string() == "a.md")
            .times(1)
            .returning(|_, _, _, chunks| {
                Ok(ReplaceResult {
                    deleted: 0,
                    inserted: chunks.len(),
                })
            });
        store
            .expect_replace_source()
            .withf(|_, _, filename, _| filename.to_string() == "b.md")
            .times(1)
            .returning(|_, _, _, _| Err(DomainError::storage("connection reset")));

        let service = mocked_service(&job, None, store);
        let outcome = service
            .chunk_documents(
                job.id().as_str(),
                ChunkDocumentsRequest::new(vec![manual("a.md"), manual("b.md")]),
            )
            .await
            .unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::Degraded);
        let batch = outcome.value().unwrap();
        assert_eq!(batch.chunks.len(), 2);
        assert!(batch.chunks.iter().all(|c| c.source_filename == "a.md"));
        assert_eq!(batch.errors.len(), 1);
        assert!(batch.errors[0].starts_with("Failed to store b.md: "));
    }

    /// In-memory store whose second source replacement fails
    #[derive(Debug, Default)]
    struct FailsOnSecondWrite {
        inner: InMemoryChunkStore,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl ChunkStore for FailsOnSecondWrite {
        async fn insert(&self, chunks: Vec<DocumentChunk>) -> Result<usize, DomainError> {
            self.inner.insert(chunks).await
        }

        async fn replace_source(
            &self,
            property_id: &str,
            source_url: &str,
            source_filename: &str,
            chunks: Vec<DocumentChunk>,
        ) -> Result<ReplaceResult, DomainError> {
            if self.writes.fetch_add(1, Ordering::SeqCst) == 1 {
                return Err(DomainError::storage("connection reset"));
            }
            self.inner
                .replace_source(property_id, source_url, source_filename, chunks)
                .await
        }

        async fn search(&self, query: &SearchQuery) -> Result<Vec<RetrievedChunk>, DomainError> {
            self.inner.search(query).await
        }

        async fn stats(&self, property_id: &str) -> Result<PropertyStats, DomainError> {
            self.inner.stats(property_id).await
        }
    }

    #[tokio::test]
    async fn test_partial_storage_job_matches_store() {
        let jobs = Arc::new(InMemoryIngestionJobRepository::new());
        let store = Arc::new(FailsOnSecondWrite::default());
        let service = IngestionService::new(
            Arc::new(SectionChunker::new(ChunkingConfig::default())),
            jobs,
            store.clone(),
        );
        let job = service
            .start(StartIngestionRequest::new(
                "villa-42",
                vec![DocumentSource::file("a.md"), DocumentSource::file("b.md")],
            ))
            .await
            .unwrap();

        service
            .chunk_documents(
                job.id().as_str(),
                ChunkDocumentsRequest::new(vec![manual("a.md"), manual("b.md")]),
            )
            .await
            .unwrap();

        let job = service.status(job.id().as_str()).await.unwrap();
        let stats = store.stats("villa-42").await.unwrap();

        assert_eq!(stats.total_chunks, 2);
        assert_eq!(job.status(), JobStatus::Completed);
        assert_eq!(job.chunks_created(), stats.total_chunks);
        assert_eq!(job.progress().documents_embedded, stats.total_chunks);
        assert_eq!(job.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_record_progress() {
        let fixture = fixture();
        let job = started(&fixture).await;

        let updated = fixture
            .service
            .record_progress(job.id().as_str(), IngestionStage::Discovery, 1)
            .await
            .unwrap();
        assert_eq!(updated.progress().documents_discovered, 1);

        fixture
            .service
            .chunk_documents(
                job.id().as_str(),
                ChunkDocumentsRequest::new(vec![manual("manual.md")]),
            )
            .await
            .unwrap();

        let job = fixture.service.status(job.id().as_str()).await.unwrap();
        let progress = job.progress();
        assert_eq!(progress.documents_parsed, 1);
        assert_eq!(progress.documents_chunked, 1);
        assert_eq!(progress.documents_embedded, 2);

        let late = fixture
            .service
            .record_progress(job.id().as_str(), IngestionStage::Parsing, 3)
            .await;
        assert!(matches!(late, Err(DomainError::Validation { .. })));
    }
}
