// file: src/corpus/reader.rs
// description: loads scanned files into page-level documents with source metadata
// reference: pdf pages follow the page tree, text pages are separated by form feeds

use crate::config::CorpusConfig;
use crate::corpus::scanner::{FileScanner, ScannedFile};
use crate::error::{AdvisorError, Result};
use crate::models::{Document, DocumentMetadata};
use crate::parser::{MarkdownParser, PdfExtractor, TextNormalizer};
use crate::utils::Validator;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const PAGE_BREAK: char = '\x0c';

pub struct DirectoryReader {
    config: CorpusConfig,
    scanner: FileScanner,
    markdown: MarkdownParser,
    pdf: PdfExtractor,
    normalizer: TextNormalizer,
}

impl DirectoryReader {
    pub fn new(config: CorpusConfig) -> Self {
        Self {
            scanner: FileScanner::new(config.clone()),
            config,
            markdown: MarkdownParser::new(),
            pdf: PdfExtractor::new(),
            normalizer: TextNormalizer::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Reads every supported file under the data directory. An empty
    /// directory yields an empty vector; a missing one is an error.
    pub fn load_data(&self) -> Result<Vec<Document>> {
        Validator::validate_directory(&self.config.data_dir)?;

        let files = self.scanner.scan_directory(&self.config.data_dir)?;
        let mut documents = Vec::new();

        for file in &files {
            let pages = self.load_file(file)?;
            debug!("Loaded {} page(s) from {}", pages.len(), file.file_name);
            documents.extend(pages);
        }

        info!(
            "Loaded {} documents from {} files",
            documents.len(),
            files.len()
        );
        Ok(documents)
    }

    fn load_file(&self, file: &ScannedFile) -> Result<Vec<Document>> {
        let bytes = fs::read(&file.path).map_err(|source| AdvisorError::FileOperation {
            path: file.path.clone(),
            source,
        })?;

        let file_path = fs::canonicalize(&file.path)
            .unwrap_or_else(|_| file.path.clone())
            .display()
            .to_string();

        let mut documents = Vec::new();

        for (page_label, page) in self.split_pages(file, &bytes)? {
            let text = self.extract_text(&file.path, &page)?;
            if text.is_empty() {
                continue;
            }

            let metadata = DocumentMetadata {
                file_name: file.file_name.clone(),
                file_path: file_path.clone(),
                page_label,
                file_size: file.size,
                last_modified: file.modified,
            };

            documents.push(Document::new(text, metadata));
        }

        Ok(documents)
    }

    /// PDF pages come from the page tree; text files are paged by form feeds.
    fn split_pages(&self, file: &ScannedFile, bytes: &[u8]) -> Result<Vec<(String, String)>> {
        if extension_of(&file.path).as_deref() == Some("pdf") {
            let pages = self
                .pdf
                .extract_pages(bytes)
                .inspect_err(|e| warn!("Failed to parse {}: {}", file.file_name, e))?;
            return Ok(pages
                .into_iter()
                .map(|page| (page.number.to_string(), page.text))
                .collect());
        }

        let raw = String::from_utf8_lossy(bytes);
        if matches!(raw, std::borrow::Cow::Owned(_)) {
            warn!("{} is not valid UTF-8; invalid bytes replaced", file.file_name);
        }

        Ok(raw
            .split(PAGE_BREAK)
            .enumerate()
            .map(|(index, page)| ((index + 1).to_string(), page.to_string()))
            .collect())
    }

    fn extract_text(&self, path: &Path, page: &str) -> Result<String> {
        let is_markdown = matches!(extension_of(path).as_deref(), Some("md") | Some("markdown"));

        let text = if is_markdown {
            let parsed = self.markdown.parse(page)?;
            debug!(
                "{}: {} heading(s)",
                path.display(),
                parsed.headings.len()
            );
            parsed.plain_text
        } else {
            page.to_string()
        };

        Ok(self.normalizer.normalize(&text))
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
