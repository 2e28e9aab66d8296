// file: src/index/builder.rs
// description: chunks documents, embeds the chunks in batches and fills a vector index
// reference: batches go out one at a time, in document order

use crate::ai::Embedder;
use crate::config::RetrievalConfig;
use crate::error::{AdvisorError, Result};
use crate::index::vector_store::VectorIndex;
use crate::models::{Document, TextNode};
use crate::parser::SentenceChunker;
use crate::pipeline::ProgressTracker;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub documents: usize,
    pub chunks: usize,
    pub dimension: usize,
    pub elapsed_secs: f64,
}

pub struct IndexBuilder {
    chunker: SentenceChunker,
    batch_size: usize,
}

impl IndexBuilder {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            chunker: SentenceChunker::new(config.chunk_size, config.chunk_overlap),
            batch_size: config.embed_batch_size.max(1),
        }
    }

    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<TextNode> {
        documents
            .iter()
            .flat_map(|document| {
                self.chunker
                    .split(&document.text)
                    .into_iter()
                    .map(move |text| TextNode::from_document(document, text))
            })
            .collect()
    }

    pub async fn from_documents(
        &self,
        documents: &[Document],
        embedder: &dyn Embedder,
        progress: Option<&ProgressTracker>,
    ) -> Result<(VectorIndex, IndexStats)> {
        let start = Instant::now();

        let nodes = self.chunk_documents(documents);
        if nodes.is_empty() {
            return Err(AdvisorError::Validation(
                "documents contain no text to embed".to_string(),
            ));
        }

        info!(
            "Embedding {} chunks from {} documents in batches of {}",
            nodes.len(),
            documents.len(),
            self.batch_size
        );

        if let Some(progress) = progress {
            progress.set_total(nodes.len());
            progress.add_documents(documents.len());
        }

        let mut index = VectorIndex::new();

        for batch in nodes.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|node| node.text.clone()).collect();
            let embeddings = embedder.embed_passages(&texts).await?;

            if embeddings.len() != batch.len() {
                return Err(AdvisorError::Embedding(format!(
                    "requested {} embeddings, received {}",
                    batch.len(),
                    embeddings.len()
                )));
            }

            for (node, embedding) in batch.iter().cloned().zip(embeddings) {
                index.insert(node, embedding)?;
            }

            debug!("Indexed {}/{} chunks", index.len(), nodes.len());

            if let Some(progress) = progress {
                progress.inc_batch(batch.len());
            }
        }

        let stats = IndexStats {
            documents: documents.len(),
            chunks: index.len(),
            dimension: index.dimension().unwrap_or(0),
            elapsed_secs: start.elapsed().as_secs_f64(),
        };

        info!(
            "Vector index ready: {} chunks, dimension {}",
            stats.chunks, stats.dimension
        );

        Ok((index, stats))
    }
}
