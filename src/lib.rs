// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod ai;
pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod utils;
pub mod web;

pub use ai::{Embedder, LanguageModel, NvidiaChatClient, NvidiaEmbeddingClient};
pub use config::{Config, CorpusConfig, NvidiaConfig, RetrievalConfig, ServerConfig};
pub use corpus::{DirectoryReader, FileScanner, ScannedFile};
pub use error::{AdvisorError, Result};
pub use index::{IndexBuilder, IndexStats, PromptTemplate, QueryEngine, VectorIndex};
pub use models::{Answer, Document, DocumentMetadata, SourceNode, TextNode};
pub use parser::{
    MarkdownParser, ParsedMarkdown, PdfExtractor, PdfPage, SentenceChunker, TextNormalizer,
};
pub use pipeline::{AiServices, DiagnosisSession, EmbedOutcome, PipelineStats, ProgressTracker};
pub use utils::{Component, HealthCheck, HealthReport, HealthStatus, StageTimer, Validator};
