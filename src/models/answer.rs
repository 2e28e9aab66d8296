// file: src/models/answer.rs
// description: generated answer together with the chunks it was grounded on
// reference: internal data structures

use crate::models::search_result::SourceNode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub response: String,
    pub source_nodes: Vec<SourceNode>,
    pub elapsed_secs: f64,
}

impl Answer {
    pub fn new(response: String, source_nodes: Vec<SourceNode>, elapsed_secs: f64) -> Self {
        Self {
            response,
            source_nodes,
            elapsed_secs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.response.trim().is_empty()
    }
}
