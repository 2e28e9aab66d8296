// file: src/parser/markdown.rs
// description: markdown to plain text extraction with pulldown-cmark
// reference: https://docs.rs/pulldown-cmark

use crate::error::Result;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

pub struct MarkdownParser;

#[derive(Debug, Clone)]
pub struct ParsedMarkdown {
    pub plain_text: String,
    pub headings: Vec<String>,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }

    /// Flattens markdown into text that keeps block boundaries as blank lines,
    /// so the chunker can still find paragraph breaks.
    pub fn parse(&self, content: &str) -> Result<ParsedMarkdown> {
        let parser = Parser::new_ext(content, Options::ENABLE_TABLES);

        let mut plain_text = String::new();
        let mut headings = Vec::new();
        let mut current_heading: Option<String> = None;

        for event in parser {
            match event {
                Event::Start(Tag::Heading { .. }) => {
                    current_heading = Some(String::new());
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(text) = current_heading.take() {
                        headings.push(text.trim().to_string());
                    }
                    plain_text.push_str("\n\n");
                }
                Event::Start(Tag::Item) => {
                    plain_text.push_str("- ");
                }
                Event::End(TagEnd::Item)
                | Event::End(TagEnd::TableHead)
                | Event::End(TagEnd::TableRow) => {
                    plain_text.push('\n');
                }
                Event::End(TagEnd::TableCell) => {
                    plain_text.push('\t');
                }
                Event::End(TagEnd::Paragraph)
                | Event::End(TagEnd::CodeBlock)
                | Event::End(TagEnd::List(_))
                | Event::End(TagEnd::Table)
                | Event::End(TagEnd::BlockQuote(_)) => {
                    plain_text.push_str("\n\n");
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(ref mut heading_text) = current_heading {
                        heading_text.push_str(&text);
                    }
                    plain_text.push_str(&text);
                }
                Event::SoftBreak => {
                    plain_text.push(' ');
                }
                Event::HardBreak => {
                    plain_text.push('\n');
                }
                _ => {}
            }
        }

        Ok(ParsedMarkdown {
            plain_text: plain_text.trim().to_string(),
            headings,
        })
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parsing() {
        let parser = MarkdownParser::new();
        let content = "# Migraine\n\nThrobbing **headache** on one side.";
        let parsed = parser.parse(content).unwrap();

        assert_eq!(parsed.headings, vec!["Migraine".to_string()]);
        assert_eq!(
            parsed.plain_text,
            "Migraine\n\nThrobbing headache on one side."
        );
    }

    #[test]
    fn test_list_items_become_lines() {
        let parser = MarkdownParser::new();
        let content = "Symptoms:\n\n* fever\n* cough\n";
        let parsed = parser.parse(content).unwrap();

        assert!(parsed.plain_text.contains("- fever\n- cough"));
    }

    #[test]
    fn test_table_header_on_its_own_line() {
        let parser = MarkdownParser::new();
        let content = "| Symptom | Cause |\n|---|---|\n| fever | flu |\n| rash | measles |\n";
        let parsed = parser.parse(content).unwrap();

        assert_eq!(
            parsed.plain_text,
            "Symptom\tCause\t\nfever\tflu\t\nrash\tmeasles"
        );
    }

    #[test]
    fn test_soft_breaks_join_lines() {
        let parser = MarkdownParser::new();
        let parsed = parser.parse("fatigue and\nmuscle aches").unwrap();
        assert_eq!(parsed.plain_text, "fatigue and muscle aches");
    }
}
