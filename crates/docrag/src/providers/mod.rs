//! Provider abstractions for embeddings and vector storage
//!
//! The pipeline treats both collaborators as opaque: embeddings come from an
//! [`EmbeddingProvider`], storage goes through a [`VectorStoreProvider`].
//! Swapping backends is a matter of implementing the trait.

pub mod embedding;
pub mod memory;
pub mod ollama;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use memory::MemoryVectorStore;
pub use ollama::OllamaEmbedder;
pub use vector_store::VectorStoreProvider;
