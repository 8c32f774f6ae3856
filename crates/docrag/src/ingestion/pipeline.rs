//! Ingestion orchestration: discovery, extraction, chunking, loading

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Semaphore;

use crate::config::IngestConfig;
use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorStoreProvider};
use crate::types::{FileType, SourceDocument};

use super::chunker::TextChunker;
use super::parser::FileExtractor;
use super::walker;

/// Summary of one ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    /// Source documents extracted (one per file, or per PDF page)
    pub documents: usize,
    /// Chunks loaded into the vector store
    pub chunks: usize,
    /// Files skipped because extraction failed
    pub skipped_files: usize,
}

/// Main ingestion pipeline
///
/// One synchronous sweep per call: walk the root for each supported file
/// type in a fixed order, extract, chunk, embed, and bulk-load into the
/// vector store. Extraction failures are skipped and logged; embedding and
/// store failures abort the run and propagate to the caller untouched.
pub struct IngestPipeline {
    config: IngestConfig,
    chunker: TextChunker,
}

impl IngestPipeline {
    /// Create a pipeline, validating the configuration up front
    pub fn new(config: IngestConfig) -> Result<Self> {
        config.validate()?;
        let chunker = TextChunker::from_config(&config.chunking);
        Ok(Self { config, chunker })
    }

    /// Create a pipeline with default configuration
    pub fn with_defaults() -> Self {
        let config = IngestConfig::default();
        let chunker = TextChunker::from_config(&config.chunking);
        Self { config, chunker }
    }

    /// Ingest every supported file under `root` into the vector store.
    ///
    /// Fails with [`Error::PathNotFound`] before any I/O when the root is
    /// missing. File types are processed in the fixed order PDF, Markdown,
    /// xlsx, CSV, JSON so logs stay reproducible.
    pub async fn ingest(
        &self,
        root: &Path,
        embedder: &dyn EmbeddingProvider,
        store: &dyn VectorStoreProvider,
    ) -> Result<IngestReport> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }

        tracing::info!("Loading documents from {}", root.display());

        let mut documents = Vec::new();
        let mut skipped_files = 0usize;

        for file_type in FileType::ALL {
            tracing::info!("Loading .{} files", file_type.extension());
            let files = walker::find_files(root, file_type)?;

            let (docs, skipped) = match file_type {
                FileType::Pdf => self.extract_concurrent(files).await,
                _ => Self::extract_sequential(files),
            };

            documents.extend(docs);
            skipped_files += skipped;
        }

        tracing::info!(
            "Extracted {} documents ({} files skipped), splitting into chunks",
            documents.len(),
            skipped_files
        );

        let mut chunks = self.chunker.split_documents(&documents);

        tracing::info!(
            "Creating embeddings for {} chunks via '{}' and loading into '{}'",
            chunks.len(),
            embedder.name(),
            store.name()
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(Error::embedding(format!(
                "expected {} embeddings, provider returned {}",
                chunks.len(),
                embeddings.len()
            )));
        }
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        store.insert_chunks(&chunks).await?;

        tracing::info!("Successfully loaded {} chunks into the vector store", chunks.len());

        Ok(IngestReport {
            documents: documents.len(),
            chunks: chunks.len(),
            skipped_files,
        })
    }

    /// Extract files one at a time, skipping and logging failures
    fn extract_sequential(files: Vec<PathBuf>) -> (Vec<SourceDocument>, usize) {
        let mut documents = Vec::new();
        let mut skipped = 0usize;

        for path in files {
            match FileExtractor::extract(&path) {
                Ok(docs) => documents.extend(docs),
                Err(err) => {
                    tracing::warn!("Skipping {}: {}", path.display(), err);
                    skipped += 1;
                }
            }
        }

        (documents, skipped)
    }

    /// Extract PDF files on a bounded pool of blocking workers.
    ///
    /// Each file's extraction is stateless and produces disjoint output, so
    /// files run independently; results merge in submission order.
    async fn extract_concurrent(&self, files: Vec<PathBuf>) -> (Vec<SourceDocument>, usize) {
        let workers = self.config.processing.pdf_workers();
        let semaphore = Arc::new(Semaphore::new(workers));

        let futures: Vec<_> = files
            .into_iter()
            .map(|path| {
                let sem = semaphore.clone();
                async move {
                    // Acquire semaphore permit
                    let _permit = sem.acquire().await.unwrap();
                    let worker_path = path.clone();
                    let result =
                        tokio::task::spawn_blocking(move || FileExtractor::extract(&worker_path))
                            .await;
                    (path, result)
                }
            })
            .collect();

        let mut documents = Vec::new();
        let mut skipped = 0usize;

        for (path, result) in join_all(futures).await {
            match result {
                Ok(Ok(docs)) => documents.extend(docs),
                Ok(Err(err)) => {
                    tracing::warn!("Skipping {}: {}", path.display(), err);
                    skipped += 1;
                }
                Err(join_err) => {
                    tracing::error!("Extraction task for {} panicked: {}", path.display(), join_err);
                    skipped += 1;
                }
            }
        }

        (documents, skipped)
    }
}
