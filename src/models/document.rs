// file: src/models/document.rs
// description: core document model with source metadata and content hashing
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Where a document came from. Copied onto every chunk cut from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_name: String,
    pub file_path: String,
    pub page_label: String,
    pub file_size: u64,
    pub last_modified: u64,
}

/// One page of a source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub content_hash: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(text: String, metadata: DocumentMetadata) -> Self {
        let content_hash = Self::compute_hash(&text);

        Self {
            id: Uuid::new_v4().to_string(),
            text,
            content_hash,
            metadata,
        }
    }

    fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> DocumentMetadata {
        DocumentMetadata {
            file_name: "flu.txt".to_string(),
            file_path: "/data/flu.txt".to_string(),
            page_label: "1".to_string(),
            file_size: 14,
            last_modified: 1234567890,
        }
    }

    #[test]
    fn test_document_creation() {
        let doc = Document::new("Influenza: fever".to_string(), metadata());

        assert_eq!(doc.metadata.file_name, "flu.txt");
        assert_eq!(doc.content_hash.len(), 64);
        assert!(!doc.id.is_empty());
    }

    #[test]
    fn test_hash_consistency() {
        let a = Document::new("same text".to_string(), metadata());
        let b = Document::new("same text".to_string(), metadata());
        assert_eq!(a.content_hash, b.content_hash);
        assert_ne!(a.id, b.id);
    }
}
