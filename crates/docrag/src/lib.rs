//! docrag: document ingestion for retrieval-augmented generation
//!
//! Walks a directory tree, extracts PDF, Markdown, spreadsheet, CSV, and
//! JSON files into a uniform document representation, splits the text into
//! overlapping chunks, and bulk-loads the chunks into a vector store through
//! pluggable embedding and storage providers.
//!
//! ```no_run
//! use docrag::{IngestConfig, IngestPipeline};
//! use docrag::config::EmbeddingConfig;
//! use docrag::providers::{MemoryVectorStore, OllamaEmbedder};
//! use std::path::Path;
//!
//! # async fn run() -> docrag::Result<()> {
//! let mut config = IngestConfig::default();
//! config.embedding = EmbeddingConfig::for_model("nomic-embed-text");
//!
//! let embedder = OllamaEmbedder::new(config.embedding.clone())?;
//! let store = MemoryVectorStore::new();
//!
//! let pipeline = IngestPipeline::new(config)?;
//! let report = pipeline.ingest(Path::new("./docs"), &embedder, &store).await?;
//! println!("loaded {} chunks from {} documents", report.chunks, report.documents);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod types;

pub use config::IngestConfig;
pub use error::{Error, Result};
pub use ingestion::{IngestPipeline, IngestReport, TextChunker};
pub use types::{Chunk, DocumentMetadata, FileType, SourceDocument};
