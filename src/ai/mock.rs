// file: src/ai/mock.rs
// description: in-process embedder, language model and http stubs for tests
// reference: keyword-count vectors stand in for remote embeddings

use crate::ai::{Embedder, LanguageModel};
use crate::config::{Config, NvidiaConfig};
use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use axum::Router;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Embeds text as counts of a fixed vocabulary, so texts sharing keywords
/// score as similar.
pub struct KeywordEmbedder {
    vocabulary: Vec<&'static str>,
    pub passage_calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new() -> Self {
        Self {
            vocabulary: vec![
                "fever", "cough", "rash", "headache", "nausea", "fatigue", "chest", "throat",
            ],
            passage_calls: AtomicUsize::new(0),
        }
    }

    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        // trailing constant keeps every vector non-zero
        let mut vector: Vec<f32> = self
            .vocabulary
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect();
        vector.push(0.1);
        vector
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed_passages(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.passage_calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vectorize(text))
    }
}

/// Always fails, to exercise error paths.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed_passages(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(AdvisorError::Api {
            service: "embedding",
            status: 503,
            body: "service unavailable".to_string(),
        })
    }

    async fn embed_query(&self, _text: &str) -> Result<Vec<f32>> {
        Err(AdvisorError::Api {
            service: "embedding",
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

/// Returns a canned answer and records the last prompt it saw.
pub struct EchoModel {
    answer: String,
    pub last_prompt: Mutex<Option<String>>,
}

impl EchoModel {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for EchoModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.answer.clone())
    }
}

/// Serves `router` on an ephemeral local port and returns its base url.
pub async fn serve_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", address)
}

/// NVIDIA settings with a test key and both endpoints pointed at `base_url`.
pub fn stub_config(base_url: &str) -> NvidiaConfig {
    let mut config = Config::default_config().nvidia;
    config.api_key = Some("nvapi-test".to_string());
    config.embedding_base_url = base_url.to_string();
    config.llm_base_url = base_url.to_string();
    config.request_timeout_secs = 5;
    config
}
