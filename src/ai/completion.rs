// file: src/ai/completion.rs
// description: OpenAI-compatible chat completion client for NVIDIA-hosted LLMs
// reference: https://docs.api.nvidia.com/nim/reference/meta-llama-3_1-405b-infer

use crate::ai::LanguageModel;
use crate::config::NvidiaConfig;
use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

pub struct NvidiaChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

impl NvidiaChatClient {
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
            base_url: config.llm_base_url.trim_end_matches('/').to_string(),
            model: config.llm_model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
        })
    }
}

fn extract_content(response: ChatCompletionResponse) -> Result<String> {
    if let Some(usage) = &response.usage {
        debug!(
            "Completion used {} prompt and {} completion tokens",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AdvisorError::Api {
            service: "completion",
            status: 200,
            body: "response contained no message content".to_string(),
        })
}

#[async_trait]
impl LanguageModel for NvidiaChatClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
            stream: false,
        };

        debug!(
            "Requesting completion from {} for {} chars of prompt",
            self.model,
            prompt.len()
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
                service: "completion",
                status,
                body,
            });
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;
        extract_content(completion)
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

    async fn chat_endpoint(
        State(recorded): State<Recorded>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        recorded.lock().unwrap().push((auth, body));

        Json(json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Rest, fluids and monitor the fever."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 42, "completion_tokens": 8, "total_tokens": 50}
        }))
    }

    #[test]
    fn test_requires_api_key() {
        let config = Config::default_config();
        assert!(matches!(
            NvidiaChatClient::new(&config.nvidia),
            Err(AdvisorError::MissingCredential)
        ));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "meta/llama-3.1-405b-instruct",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.2,
            top_p: 0.7,
            max_tokens: 1024,
            stream: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "meta/llama-3.1-405b-instruct");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_extract_content() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"  Likely a common cold.  "},"finish_reason":"stop"}],
                "usage":{"prompt_tokens":10,"completion_tokens":5,"total_tokens":15}}"#,
        )
        .unwrap();

        assert_eq!(extract_content(response).unwrap(), "Likely a common cold.");
    }

    #[test]
    fn test_extract_content_empty_choices() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(extract_content(response).is_err());

        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        assert!(extract_content(response).is_err());
    }

    #[tokio::test]
    async fn test_completes_over_http() {
        let recorded = Recorded::default();
        let router = Router::new()
            .route("/chat/completions", post(chat_endpoint))
            .with_state(Arc::clone(&recorded));
        let base_url = serve_stub(router).await;
        let client = NvidiaChatClient::new(&stub_config(&base_url)).unwrap();

        let answer = client.complete("User's Symptoms: fever").await.unwrap();
        assert_eq!(answer, "Rest, fluids and monitor the fever.");

        let recorded = recorded.lock().unwrap();
        let (auth, body) = &recorded[0];
        assert_eq!(auth, "Bearer nvapi-test");
        assert_eq!(body["model"], "meta/llama-3.1-405b-instruct");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "User's Symptoms: fever");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["stream"], false);
    }

    #[tokio::test]
    async fn test_server_error_becomes_api_error() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream failure") }),
        );
        let base_url = serve_stub(router).await;
        let client = NvidiaChatClient::new(&stub_config(&base_url)).unwrap();

        let err = client.complete("fever").await.unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::Api { service: "completion", status: 500, ref body } if body == "upstream failure"
        ));
    }
}
