// file: src/pipeline/session.rs
// description: the two user actions of the demo, embedding the corpus and asking about symptoms
// reference: one shared index per process, swapped in only once fully built and rebuilt when the corpus changes

use crate::ai::{Embedder, LanguageModel, NvidiaChatClient, NvidiaEmbeddingClient};
use crate::config::{Config, NvidiaConfig};
use crate::corpus::{DirectoryReader, FileScanner};
use crate::error::{AdvisorError, Result};
use crate::index::{IndexBuilder, IndexStats, QueryEngine, VectorIndex};
use crate::models::{Answer, Document};
use crate::pipeline::ProgressTracker;
use crate::utils::{HealthCheck, HealthReport, StageTimer, Validator};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// The remote services a session talks to.
#[derive(Clone)]
pub struct AiServices {
    pub embedder: Arc<dyn Embedder>,
    pub llm: Arc<dyn LanguageModel>,
}

impl AiServices {
    pub fn from_config(config: &NvidiaConfig) -> Result<Self> {
        Ok(Self {
            embedder: Arc::new(NvidiaEmbeddingClient::new(config)?),
            llm: Arc::new(NvidiaChatClient::new(config)?),
        })
    }
}

#[derive(Debug, Clone)]
pub enum EmbedOutcome {
    Built(IndexStats),
    AlreadyReady(IndexStats),
}

impl EmbedOutcome {
    pub fn stats(&self) -> &IndexStats {
        match self {
            EmbedOutcome::Built(stats) | EmbedOutcome::AlreadyReady(stats) => stats,
        }
    }
}

struct ReadyIndex {
    index: Arc<VectorIndex>,
    stats: IndexStats,
    fingerprint: String,
}

pub struct DiagnosisSession {
    config: Config,
    services: Option<AiServices>,
    index: RwLock<Option<ReadyIndex>>,
    build_lock: Mutex<()>,
}

impl DiagnosisSession {
    /// A missing credential is not fatal here; it is reported when the user
    /// tries to embed or query.
    pub fn new(config: Config) -> Result<Self> {
        let services = match AiServices::from_config(&config.nvidia) {
            Ok(services) => Some(services),
            Err(AdvisorError::MissingCredential) => {
                warn!("{}", AdvisorError::MissingCredential);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self::with_services(config, services))
    }

    pub fn with_services(config: Config, services: Option<AiServices>) -> Self {
        Self {
            config,
            services,
            index: RwLock::new(None),
            build_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn has_credential(&self) -> bool {
        self.services.is_some()
    }

    pub async fn is_ready(&self) -> bool {
        self.index.read().await.is_some()
    }

    pub async fn stats(&self) -> Option<IndexStats> {
        self.index.read().await.as_ref().map(|ready| ready.stats.clone())
    }

    /// Loads the corpus, keeps the first `max_documents` pages and builds the
    /// index. The current index is reused when the loaded pages are unchanged
    /// since it was built, unless `force` is set.
    pub async fn embed_documents(
        &self,
        force: bool,
        progress: Option<&ProgressTracker>,
    ) -> Result<EmbedOutcome> {
        let services = self
            .services
            .as_ref()
            .ok_or(AdvisorError::MissingCredential)?;

        let _building = self.build_lock.lock().await;
        let timer = StageTimer::start("document embedding");

        let reader = DirectoryReader::new(self.config.corpus.clone());
        let mut documents = reader.load_data()?;

        if documents.is_empty() {
            return Err(AdvisorError::NoDocuments(reader.data_dir().to_path_buf()));
        }

        let limit = self.config.corpus.max_documents;
        if documents.len() > limit {
            info!(
                "Limiting embedding to the first {} of {} documents",
                limit,
                documents.len()
            );
            documents.truncate(limit);
        }

        let fingerprint = corpus_fingerprint(&documents);

        if !force
            && let Some(ready) = self.index.read().await.as_ref()
            && ready.fingerprint == fingerprint
        {
            info!("Corpus unchanged since the last build; reusing the vector index");
            return Ok(EmbedOutcome::AlreadyReady(ready.stats.clone()));
        }

        let builder = IndexBuilder::new(&self.config.retrieval);
        let (index, stats) = builder
            .from_documents(&documents, services.embedder.as_ref(), progress)
            .await?;

        *self.index.write().await = Some(ReadyIndex {
            index: Arc::new(index),
            stats: stats.clone(),
            fingerprint,
        });

        timer.finish_with_count(stats.chunks, "chunks");
        Ok(EmbedOutcome::Built(stats))
    }

    pub async fn ask(&self, symptoms: &str) -> Result<Answer> {
        let symptoms = Validator::validate_query(symptoms, self.config.server.max_query_chars)?;

        let index = self
            .index
            .read()
            .await
            .as_ref()
            .map(|ready| Arc::clone(&ready.index))
            .ok_or(AdvisorError::IndexNotReady)?;

        let services = self
            .services
            .as_ref()
            .ok_or(AdvisorError::MissingCredential)?;

        let engine = QueryEngine::new(
            index,
            Arc::clone(&services.embedder),
            Arc::clone(&services.llm),
            self.config.retrieval.similarity_top_k,
        );

        engine.query(&symptoms).await
    }

    pub async fn health(&self) -> HealthReport {
        let data_dir = &self.config.corpus.data_dir;
        let scan = Validator::validate_directory(data_dir).and_then(|()| {
            FileScanner::new(self.config.corpus.clone())
                .scan_directory(data_dir)
                .map(|files| files.len())
        });
        let stats = self.stats().await;

        HealthReport::new(vec![
            HealthCheck::credential(self.has_credential()),
            HealthCheck::corpus(data_dir, scan),
            HealthCheck::index(stats.as_ref()),
        ])
    }
}

/// Identifies the exact pages an index was built from.
fn corpus_fingerprint(documents: &[Document]) -> String {
    let mut hasher = Sha256::new();
    for document in documents {
        hasher.update(document.metadata.file_path.as_bytes());
        hasher.update(document.metadata.page_label.as_bytes());
        hasher.update(document.content_hash.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
