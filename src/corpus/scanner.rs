// file: src/corpus/scanner.rs
// description: Directory walking and file discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::CorpusConfig;
use crate::error::{AdvisorError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

pub struct FileScanner {
    config: CorpusConfig,
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    pub modified: u64,
}

impl FileScanner {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        info!("Scanning directory: {}", root.display());
        let mut files = Vec::new();

        let mut walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name();
        if !self.config.recursive {
            walker = walker.max_depth(1);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        {
            let entry = entry.map_err(|e| AdvisorError::FileOperation {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop detected")),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if self.should_skip(path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            if !self.has_supported_extension(path) {
                debug!("Skipping unsupported file type: {}", path.display());
                continue;
            }

            let Ok(metadata) = entry.metadata() else {
                continue;
            };

            let size = metadata.len();
            let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;

            if size > max_size {
                debug!(
                    "Skipping large file ({} MB): {}",
                    size / 1024 / 1024,
                    path.display()
                );
                continue;
            }

            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);

            files.push(ScannedFile {
                path: path.to_path_buf(),
                file_name: entry.file_name().to_string_lossy().to_string(),
                size,
                modified,
            });
        }

        info!("Found {} document files", files.len());
        Ok(files)
    }

    fn has_supported_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.config
                    .extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    fn should_skip(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.config.skip_patterns {
            if pattern.contains('*') {
                let pattern_without_star = pattern.replace("*.", ".");
                if path_str.ends_with(&pattern_without_star) {
                    return true;
                }
            } else if path_str.contains(pattern.as_str()) {
                return true;
            }
        }

        false
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
