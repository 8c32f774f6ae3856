//! In-memory vector store for tests and local development

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;
use crate::types::Chunk;

use super::vector_store::VectorStoreProvider;

/// Vector store that keeps every loaded chunk in process memory
///
/// Useful as the local collaborator in tests and small corpora; nothing is
/// persisted across runs.
#[derive(Default)]
pub struct MemoryVectorStore {
    chunks: RwLock<Vec<Chunk>>,
}

impl MemoryVectorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored chunk
    pub fn chunks(&self) -> Vec<Chunk> {
        self.chunks.read().clone()
    }
}

#[async_trait]
impl VectorStoreProvider for MemoryVectorStore {
    async fn insert_chunk(&self, chunk: &Chunk) -> Result<()> {
        self.chunks.write().push(chunk.clone());
        Ok(())
    }

    async fn insert_chunks(&self, chunks: &[Chunk]) -> Result<()> {
        self.chunks.write().extend_from_slice(chunks);
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.chunks.read().len())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
