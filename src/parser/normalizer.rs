// file: src/parser/normalizer.rs
// description: whitespace normalization applied to every loaded page
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLANK_RUNS: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref SPACE_RUNS: Regex = Regex::new(r" {2,}").unwrap();
}

pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, content: &str) -> String {
        let unified = self.normalize_line_endings(content);
        let trimmed = self.trim_lines(&unified);
        let collapsed = SPACE_RUNS.replace_all(&trimmed, " ");
        BLANK_RUNS
            .replace_all(&collapsed, "\n\n")
            .trim()
            .to_string()
    }

    fn normalize_line_endings(&self, content: &str) -> String {
        content.replace("\r\n", "\n").replace('\r', "\n")
    }

    fn trim_lines(&self, content: &str) -> String {
        content
            .lines()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_break_normalization() {
        let normalizer = TextNormalizer::new();
        let content = "Line 1\r\n\r\n\r\n\r\nLine 2";
        assert_eq!(normalizer.normalize(content), "Line 1\n\nLine 2");
    }

    #[test]
    fn test_trailing_whitespace_removed() {
        let normalizer = TextNormalizer::new();
        let content = "  Fever   \nChills\t\n";
        assert_eq!(normalizer.normalize(content), "Fever\nChills");
    }

    #[test]
    fn test_space_runs_collapsed() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize("sore    throat and  cough"),
            "sore throat and cough"
        );
    }
}
