// file: src/models/search_result.rs
// description: Retrieved chunk with its similarity score
// reference: Used for vector similarity search results

use crate::models::node::TextNode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceNode {
    /// The retrieved chunk
    pub node: TextNode,

    /// Cosine similarity to the query (higher is more similar, -1.0 to 1.0)
    pub score: f32,
}

impl SourceNode {
    pub fn new(node: TextNode, score: f32) -> Self {
        Self { node, score }
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, max_content_len: usize) -> String {
        let content_preview = if self.node.text.chars().count() > max_content_len {
            let truncated: String = self.node.text.chars().take(max_content_len).collect();
            format!("{}...", truncated)
        } else {
            self.node.text.clone()
        };

        format!(
            "Score: {:.4} | File: {} (Page {})\nPath: {}\n{}\n",
            self.score,
            self.node.file_name(),
            self.node.page_label(),
            self.node.file_path(),
            content_preview
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, DocumentMetadata};

    fn source(text: &str, score: f32) -> SourceNode {
        let document = Document::new(
            text.to_string(),
            DocumentMetadata {
                file_name: "asthma.txt".to_string(),
                file_path: "/data/asthma.txt".to_string(),
                page_label: "3".to_string(),
                file_size: text.len() as u64,
                last_modified: 0,
            },
        );
        SourceNode::new(TextNode::from_document(&document, text.to_string()), score)
    }

    #[test]
    fn test_format_summary() {
        let result = source("Wheezing and shortness of breath are common signs", 0.87);

        let summary = result.format_summary(20);
        assert!(summary.contains("0.8700"));
        assert!(summary.contains("File: asthma.txt (Page 3)"));
        assert!(summary.contains("Path: /data/asthma.txt"));
        assert!(summary.contains("..."));
    }

    #[test]
    fn test_format_summary_multibyte() {
        let result = source("fièvre élevée et toux sèche", 0.5);
        let summary = result.format_summary(8);
        assert!(summary.contains("fièvre é..."));
    }
}
