//! Vector store provider trait for the initial bulk load

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Chunk;

/// Trait for vector storage
///
/// This core only performs the initial bulk load; query semantics, index
/// maintenance, and persistence layout belong to the implementation.
///
/// Implementations:
/// - `MemoryVectorStore`: in-process store for tests and local development
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Insert a chunk with its embedding
    async fn insert_chunk(&self, chunk: &Chunk) -> Result<()>;

    /// Insert multiple chunks (batch)
    async fn insert_chunks(&self, chunks: &[Chunk]) -> Result<()> {
        for chunk in chunks {
            self.insert_chunk(chunk).await?;
        }
        Ok(())
    }

    /// Get total number of chunks stored
    async fn len(&self) -> Result<usize>;

    /// Check if store is empty
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
