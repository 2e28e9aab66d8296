// file: src/parser/mod.rs
// description: text extraction (markdown, pdf), normalization and chunking module exports
// reference: internal module structure

pub mod chunker;
pub mod markdown;
pub mod normalizer;
pub mod pdf;

pub use chunker::SentenceChunker;
pub use markdown::{MarkdownParser, ParsedMarkdown};
pub use normalizer::TextNormalizer;
pub use pdf::{PdfExtractor, PdfPage};
