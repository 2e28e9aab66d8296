// file: src/ai/mod.rs
// description: embedding and completion service seams with NVIDIA-hosted implementations
// reference: https://docs.rs/async-trait

pub mod completion;
pub mod embeddings;
#[cfg(test)]
pub(crate) mod mock;

use crate::error::Result;
use async_trait::async_trait;

pub use completion::NvidiaChatClient;
pub use embeddings::NvidiaEmbeddingClient;

/// Turns text into vectors. Passages and queries may be embedded differently
/// by asymmetric retrieval models.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_passages(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
}

/// Produces a natural-language completion for a fully assembled prompt.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
