// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AdvisorError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the NVIDIA API credential.
pub const API_KEY_ENV: &str = "NVIDIA_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub nvidia: NvidiaConfig,
    pub corpus: CorpusConfig,
    pub retrieval: RetrievalConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NvidiaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub embedding_base_url: String,
    pub embedding_model: String,
    pub embedding_truncate: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    pub data_dir: PathBuf,
    pub recursive: bool,
    pub max_documents: usize,
    pub max_file_size_mb: usize,
    pub extensions: Vec<String>,
    pub skip_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    pub similarity_top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embed_batch_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_query_chars: usize,
}

impl Config {
    /// Layers built-in defaults, an optional TOML file and
    /// `SYMPTOM_ADVISOR__SECTION__KEY` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new("config/default.toml")).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SYMPTOM_ADVISOR")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        if config.nvidia.api_key.is_none() {
            config.nvidia.api_key = std::env::var(API_KEY_ENV).ok();
        }
        config.nvidia.api_key = config
            .nvidia
            .api_key
            .take()
            .filter(|key| !key.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            nvidia: NvidiaConfig {
                api_key: None,
                embedding_base_url: "https://ai.api.nvidia.com/v1/retrieval/nvidia".to_string(),
                embedding_model: "NV-Embed-QA".to_string(),
                embedding_truncate: "END".to_string(),
                llm_base_url: "https://integrate.api.nvidia.com/v1".to_string(),
                llm_model: "meta/llama-3.1-405b-instruct".to_string(),
                temperature: 0.2,
                top_p: 0.7,
                max_tokens: 1024,
                request_timeout_secs: 120,
            },
            corpus: CorpusConfig {
                data_dir: PathBuf::from("./medical_data"),
                recursive: false,
                max_documents: 30,
                max_file_size_mb: 10,
                extensions: vec![
                    "txt".to_string(),
                    "text".to_string(),
                    "md".to_string(),
                    "markdown".to_string(),
                    "csv".to_string(),
                    "pdf".to_string(),
                ],
                skip_patterns: vec![".git/".to_string(), "*.tmp".to_string()],
            },
            retrieval: RetrievalConfig {
                similarity_top_k: 20,
                chunk_size: 1024,
                chunk_overlap: 200,
                embed_batch_size: 10,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8501,
                max_query_chars: 200,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        for url in [&self.nvidia.embedding_base_url, &self.nvidia.llm_base_url] {
            Validator::validate_url(url).map_err(|e| AdvisorError::Config(e.to_string()))?;
        }

        if self.retrieval.similarity_top_k == 0 {
            return Err(AdvisorError::Config(
                "similarity_top_k must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.embed_batch_size == 0 {
            return Err(AdvisorError::Config(
                "embed_batch_size must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.chunk_size == 0 {
            return Err(AdvisorError::Config(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.chunk_overlap >= self.retrieval.chunk_size {
            return Err(AdvisorError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.retrieval.chunk_overlap, self.retrieval.chunk_size
            )));
        }

        if self.corpus.max_documents == 0 {
            return Err(AdvisorError::Config(
                "max_documents must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(AdvisorError::Config("port cannot be 0".to_string()));
        }

        if self.server.max_query_chars == 0 {
            return Err(AdvisorError::Config(
                "max_query_chars must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
