// file: src/index/vector_store.rs
// description: in-memory vector index with cosine similarity search
// reference: brute-force scan, sized for a few hundred chunks

use crate::error::{AdvisorError, Result};
use crate::models::{SourceNode, TextNode};

struct IndexedNode {
    node: TextNode,
    embedding: Vec<f32>,
}

/// Holds chunks and their embeddings for the lifetime of the process.
/// The dimension is fixed by the first inserted vector.
#[derive(Default)]
pub struct VectorIndex {
    entries: Vec<IndexedNode>,
    dimension: Option<usize>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: TextNode, embedding: Vec<f32>) -> Result<()> {
        if embedding.is_empty() {
            return Err(AdvisorError::Embedding(format!(
                "empty embedding for chunk {}",
                node.id
            )));
        }

        match self.dimension {
            Some(dim) if dim != embedding.len() => {
                return Err(AdvisorError::Embedding(format!(
                    "Expected embedding dimension {}, got {}",
                    dim,
                    embedding.len()
                )));
            }
            Some(_) => {}
            None => self.dimension = Some(embedding.len()),
        }

        self.entries.push(IndexedNode { node, embedding });
        Ok(())
    }

    /// Returns up to `k` chunks ordered by descending cosine similarity.
    /// Equal scores keep insertion order.
    pub fn search(&self, query_embedding: &[f32], k: usize) -> Result<Vec<SourceNode>> {
        let Some(dim) = self.dimension else {
            return Ok(Vec::new());
        };

        if query_embedding.len() != dim {
            return Err(AdvisorError::Embedding(format!(
                "Query embedding dimension {} doesn't match index dimension {}",
                query_embedding.len(),
                dim
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(query_embedding, &entry.embedding)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, score)| SourceNode::new(self.entries[i].node.clone(), score))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

/// Non-finite results (from infinite components) score as 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    let similarity = dot_product / (magnitude_a * magnitude_b);
    if similarity.is_finite() { similarity } else { 0.0 }
}
