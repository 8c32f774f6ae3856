//! Document and chunk types with source tracking

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Markdown file
    Markdown,
    /// Excel spreadsheet (.xlsx)
    Xlsx,
    /// CSV file
    Csv,
    /// JSON file (ingested as raw text)
    Json,
}

impl FileType {
    /// All supported file types, in the fixed order the pipeline processes them
    pub const ALL: [FileType; 5] = [
        FileType::Pdf,
        FileType::Markdown,
        FileType::Xlsx,
        FileType::Csv,
        FileType::Json,
    ];

    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "md" | "markdown" => Some(Self::Markdown),
            "xlsx" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect file type from a path's extension
    pub fn for_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical extension for this file type
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Markdown => "md",
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Markdown => "Markdown",
            Self::Xlsx => "Excel Spreadsheet (.xlsx)",
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }
}

/// Source information attached to every document and inherited by its chunks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMetadata {
    /// Path of the originating file
    pub source: PathBuf,
    /// Page number (1-indexed, PDFs only; None for unpaginated text)
    pub page: Option<u32>,
    /// File type of the originating file
    pub file_type: FileType,
}

impl DocumentMetadata {
    /// Create metadata for a file
    pub fn new(source: impl Into<PathBuf>, page: Option<u32>, file_type: FileType) -> Self {
        Self {
            source: source.into(),
            page,
            file_type,
        }
    }
}

/// The uniform in-memory record produced by extracting one file
/// (or one page of a multi-page file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Extracted text content
    pub content: String,
    /// Source information
    pub metadata: DocumentMetadata,
}

impl SourceDocument {
    /// Create a new source document
    pub fn new(content: String, metadata: DocumentMetadata) -> Self {
        Self { content, metadata }
    }
}

/// A bounded-size text fragment derived from exactly one source document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Text content
    pub content: String,
    /// Source information inherited from the parent document
    pub metadata: DocumentMetadata,
    /// Chunk index within the parent document (0-based)
    pub chunk_index: u32,
    /// Embedding vector (empty until embedded)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Create a new chunk without an embedding
    pub fn new(content: String, metadata: DocumentMetadata, chunk_index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            metadata,
            chunk_index,
            embedding: Vec::new(),
        }
    }
}
