// file: src/index/mod.rs
// description: in-memory vector index, index construction and query engine exports
// reference: internal module structure

pub mod builder;
pub mod prompt;
pub mod query_engine;
pub mod vector_store;

pub use builder::{IndexBuilder, IndexStats};
pub use prompt::PromptTemplate;
pub use query_engine::QueryEngine;
pub use vector_store::VectorIndex;
