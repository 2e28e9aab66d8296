// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod answer;
pub mod document;
pub mod node;
pub mod search_result;

pub use answer::Answer;
pub use document::{Document, DocumentMetadata};
pub use node::TextNode;
pub use search_result::SourceNode;
