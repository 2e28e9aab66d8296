// file: src/corpus/mod.rs
// description: document corpus discovery and loading module exports
// reference: internal module structure

pub mod reader;
pub mod scanner;

pub use reader::DirectoryReader;
pub use scanner::{FileScanner, ScannedFile};
