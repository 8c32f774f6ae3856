//! Core data types shared across the pipeline

pub mod document;

pub use document::{Chunk, DocumentMetadata, FileType, SourceDocument};
