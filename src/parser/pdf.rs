// file: src/parser/pdf.rs
// description: per-page text extraction from PDF files
// reference: https://docs.rs/lopdf

use crate::error::Result;
use lopdf::Document as PdfDocument;
use tracing::{debug, warn};

/// Text of one PDF page with its 1-based page number.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfPage {
    pub number: u32,
    pub text: String,
}

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// A page whose text cannot be decoded is skipped; an unparseable file is an error.
    pub fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PdfPage>> {
        let document = PdfDocument::load_mem(bytes)?;
        let pages = document.get_pages();
        debug!("PDF has {} page(s)", pages.len());

        let mut extracted = Vec::with_capacity(pages.len());
        for &number in pages.keys() {
            match document.extract_text(&[number]) {
                Ok(text) => extracted.push(PdfPage { number, text }),
                Err(e) => warn!("Skipping unreadable PDF page {}: {}", number, e),
            }
        }

        Ok(extracted)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a minimal PDF with one line of Courier text per page.
#[cfg(test)]
pub(crate) fn sample_pdf(pages: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Count" => pages.len() as i64,
        "Kids" => kids,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;

    #[test]
    fn test_extracts_each_page() {
        let bytes = sample_pdf(&["Measles causes a red rash.", "Angina causes chest pain."]);

        let pages = PdfExtractor::new().extract_pages(&bytes).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert!(pages[0].text.contains("Measles causes a red rash."));
        assert_eq!(pages[1].number, 2);
        assert!(pages[1].text.contains("Angina causes chest pain."));
    }

    #[test]
    fn test_invalid_pdf_is_error() {
        let result = PdfExtractor::new().extract_pages(b"plain text, not a pdf");
        assert!(matches!(result, Err(AdvisorError::Pdf(_))));
    }
}
