// file: src/ai/embeddings.rs
// description: NVIDIA retrieval embedding API client (NV-Embed-QA)
// reference: https://docs.api.nvidia.com/nim/reference/nvidia-embed-qa-4

use crate::ai::Embedder;
use crate::config::NvidiaConfig;
use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [String],
    model: &'a str,
    input_type: &'a str,
    encoding_format: &'a str,
    truncate: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

pub struct NvidiaEmbeddingClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    truncate: String,
}

impl NvidiaEmbeddingClient {
    pub fn new(config: &NvidiaConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(AdvisorError::MissingCredential)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.embedding_base_url.trim_end_matches('/').to_string(),
            model: config.embedding_model.clone(),
            truncate: config.embedding_truncate.clone(),
        })
    }

    async fn request(&self, texts: &[String], input_type: &str) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/embeddings", self.base_url);

        let request = EmbeddingRequest {
            input: texts,
            model: &self.model,
            input_type,
            encoding_format: "float",
            truncate: &self.truncate,
        };

        debug!(
            "Requesting {} {} embedding(s) from {}",
            texts.len(),
            input_type,
            self.model
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AdvisorError::Api {
                service: "embedding",
                status,
                body,
            });
        }

        let body = response.text().await?;
        let embedding_response: EmbeddingResponse = serde_json::from_str(&body)?;
        collect_embeddings(embedding_response, texts.len())
    }
}

/// Orders returned vectors by their `index` field and checks the count
/// matches the request.
fn collect_embeddings(response: EmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
    let mut data = response.data;

    if data.len() != expected {
        return Err(AdvisorError::Embedding(format!(
            "requested {} embeddings, received {}",
            expected,
            data.len()
        )));
    }

    data.sort_by_key(|item| item.index);

    let embeddings: Vec<Vec<f32>> = data.into_iter().map(|item| item.embedding).collect();

    if embeddings.iter().any(|e| e.is_empty()) {
        return Err(AdvisorError::Embedding(
            "received an empty embedding vector".to_string(),
        ));
    }

    if let Some(first) = embeddings.first() {
        debug!("Received embeddings of dimension {}", first.len());
    }

    Ok(embeddings)
}

#[async_trait]
impl Embedder for NvidiaEmbeddingClient {
    async fn embed_passages(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.request(texts, "passage").await
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let input = [text.to_string()];
        self.request(&input, "query")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AdvisorError::Embedding("no query embedding returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ai::mock::{serve_stub, stub_config};
    use axum::Router;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
    use axum::routing::post;
    use axum::Json;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    type Recorded = Arc<Mutex<Vec<(String, Value)>>>;

    /// Answers with indices in reverse order; vector i is `[i, 1.0]`.
    async fn embeddings_endpoint(
        State(recorded): State<Recorded>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let count = body["input"].as_array().map(Vec::len).unwrap_or(0);
        recorded.lock().unwrap().push((auth, body));

        let data: Vec<Value> = (0..count)
            .rev()
            .map(|i| json!({"index": i, "embedding": [i as f32, 1.0], "object": "embedding"}))
            .collect();
        Json(json!({"object": "list", "data": data, "model": "NV-Embed-QA"}))
    }

    #[test]
    fn test_requires_api_key() {
        let config = Config::default_config();
        assert!(matches!(
            NvidiaEmbeddingClient::new(&config.nvidia),
            Err(AdvisorError::MissingCredential)
        ));
    }

    #[test]
    fn test_builds_with_api_key() {
        let mut config = Config::default_config();
        config.nvidia.api_key = Some("nvapi-test".to_string());
        config.nvidia.embedding_base_url = "https://example.com/v1/".to_string();

        let client = NvidiaEmbeddingClient::new(&config.nvidia).unwrap();
        assert_eq!(client.base_url, "https://example.com/v1");
        assert_eq!(client.model, "NV-Embed-QA");
    }

    #[test]
    fn test_request_serialization() {
        let input = vec!["chest pain".to_string()];
        let request = EmbeddingRequest {
            input: &input,
            model: "NV-Embed-QA",
            input_type: "query",
            encoding_format: "float",
            truncate: "END",
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["input"][0], "chest pain");
        assert_eq!(json["input_type"], "query");
        assert_eq!(json["truncate"], "END");
    }

    #[test]
    fn test_collect_embeddings_orders_by_index() {
        let response: EmbeddingResponse = serde_json::from_str(
            r#"{"object":"list","data":[
                {"index":1,"embedding":[0.0,1.0],"object":"embedding"},
                {"index":0,"embedding":[1.0,0.0],"object":"embedding"}
            ],"model":"NV-Embed-QA"}"#,
        )
        .unwrap();

        let embeddings = collect_embeddings(response, 2).unwrap();
        assert_eq!(embeddings, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_collect_embeddings_count_mismatch() {
        let response: EmbeddingResponse =
            serde_json::from_str(r#"{"data":[{"index":0,"embedding":[1.0]}]}"#).unwrap();

        assert!(collect_embeddings(response, 3).is_err());
    }

    #[tokio::test]
    async fn test_embeds_passages_and_query_over_http() {
        let recorded = Recorded::default();
        let router = Router::new()
            .route("/embeddings", post(embeddings_endpoint))
            .with_state(Arc::clone(&recorded));
        let base_url = serve_stub(router).await;
        let client = NvidiaEmbeddingClient::new(&stub_config(&base_url)).unwrap();

        let passages = client
            .embed_passages(&["fever".to_string(), "rash".to_string()])
            .await
            .unwrap();
        assert_eq!(passages, vec![vec![0.0, 1.0], vec![1.0, 1.0]]);

        let query = client.embed_query("cough").await.unwrap();
        assert_eq!(query, vec![0.0, 1.0]);

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.len(), 2);

        let (auth, passage_body) = &recorded[0];
        assert_eq!(auth, "Bearer nvapi-test");
        assert_eq!(passage_body["input_type"], "passage");
        assert_eq!(passage_body["model"], "NV-Embed-QA");
        assert_eq!(passage_body["encoding_format"], "float");
        assert_eq!(passage_body["truncate"], "END");

        let (auth, query_body) = &recorded[1];
        assert_eq!(auth, "Bearer nvapi-test");
        assert_eq!(query_body["input_type"], "query");
        assert_eq!(query_body["input"], json!(["cough"]));
    }

    #[tokio::test]
    async fn test_server_error_becomes_api_error() {
        let router = Router::new().route(
            "/embeddings",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded") }),
        );
        let base_url = serve_stub(router).await;
        let client = NvidiaEmbeddingClient::new(&stub_config(&base_url)).unwrap();

        let err = client.embed_query("fever").await.unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::Api { service: "embedding", status: 500, ref body } if body == "model overloaded"
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let router = Router::new().route("/embeddings", post(|| async { "not json" }));
        let base_url = serve_stub(router).await;
        let client = NvidiaEmbeddingClient::new(&stub_config(&base_url)).unwrap();

        let err = client.embed_passages(&["fever".to_string()]).await.unwrap_err();
        assert!(matches!(err, AdvisorError::Serialization(_)));
    }
}
