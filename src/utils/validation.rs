// file: src/utils/validation.rs
// description: input validation utilities and helpers
// reference: input validation patterns

use crate::error::{AdvisorError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(AdvisorError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(AdvisorError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Trims the symptom text and enforces the character limit of the input box.
    pub fn validate_query(query: &str, max_chars: usize) -> Result<String> {
        let trimmed = query.trim();

        if trimmed.is_empty() {
            return Err(AdvisorError::Validation(
                "Please enter your symptoms".to_string(),
            ));
        }

        let length = trimmed.chars().count();
        if length > max_chars {
            return Err(AdvisorError::Validation(format!(
                "Symptoms must be at most {} characters (got {})",
                max_chars, length
            )));
        }

        Ok(trimmed.to_string())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AdvisorError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn truncate_text(text: &str, max_length: usize) -> String {
        if text.chars().count() <= max_length {
            text.to_string()
        } else {
            let truncated: String = text.chars().take(max_length).collect();
            format!("{}...", truncated)
        }
    }
}
