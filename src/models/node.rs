// file: src/models/node.rs
// description: text chunk cut from a document, the unit of embedding and retrieval
// reference: internal data structures

use crate::models::document::{Document, DocumentMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextNode {
    pub id: String,
    pub document_id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl TextNode {
    pub fn from_document(document: &Document, text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            document_id: document.id.clone(),
            text,
            metadata: document.metadata.clone(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.metadata.file_name
    }

    pub fn file_path(&self) -> &str {
        &self.metadata.file_path
    }

    pub fn page_label(&self) -> &str {
        &self.metadata.page_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_inherits_document_metadata() {
        let document = Document::new(
            "Measles presents with rash.".to_string(),
            DocumentMetadata {
                file_name: "measles.md".to_string(),
                file_path: "/data/measles.md".to_string(),
                page_label: "2".to_string(),
                file_size: 27,
                last_modified: 0,
            },
        );

        let node = TextNode::from_document(&document, "rash".to_string());

        assert_eq!(node.document_id, document.id);
        assert_eq!(node.file_name(), "measles.md");
        assert_eq!(node.file_path(), "/data/measles.md");
        assert_eq!(node.page_label(), "2");
        assert_ne!(node.id, document.id);
    }
}
