//! Document ingestion: discovery, multi-format extraction, chunking,
//! and pipeline orchestration

mod chunker;
mod parser;
mod pipeline;
pub mod walker;

pub use chunker::TextChunker;
pub use parser::FileExtractor;
pub use pipeline::{IngestPipeline, IngestReport};
