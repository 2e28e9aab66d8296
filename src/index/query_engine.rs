// file: src/index/query_engine.rs
// description: retrieve-then-generate over the vector index
// reference: embed query -> top-k chunks -> fill prompt -> complete

use crate::ai::{Embedder, LanguageModel};
use crate::error::Result;
use crate::index::prompt::PromptTemplate;
use crate::index::vector_store::VectorIndex;
use crate::models::Answer;
use crate::utils::StageTimer;
use std::sync::Arc;
use tracing::{debug, info};

pub struct QueryEngine {
    index: Arc<VectorIndex>,
    embedder: Arc<dyn Embedder>,
    llm: Arc<dyn LanguageModel>,
    similarity_top_k: usize,
    template: PromptTemplate,
}

impl QueryEngine {
    pub fn new(
        index: Arc<VectorIndex>,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn LanguageModel>,
        similarity_top_k: usize,
    ) -> Self {
        Self {
            index,
            embedder,
            llm,
            similarity_top_k: similarity_top_k.max(1),
            template: PromptTemplate::medical(),
        }
    }

    pub async fn query(&self, symptoms: &str) -> Result<Answer> {
        let timer = StageTimer::start("symptom query");

        let query_embedding = self.embedder.embed_query(symptoms).await?;
        let sources = self.index.search(&query_embedding, self.similarity_top_k)?;

        debug!(
            "Retrieved {} chunks (top score {:.4})",
            sources.len(),
            sources.first().map(|s| s.score).unwrap_or(0.0)
        );

        let prompt = self.template.render(&sources, symptoms);
        let response = self.llm.complete(&prompt).await?;

        let elapsed_secs = timer.finish();
        info!("Answered query with {} source chunks", sources.len());

        Ok(Answer::new(response, sources, elapsed_secs))
    }
}
