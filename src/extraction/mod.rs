// src/extraction/mod.rs
//! Résumé text extraction.
//!
//! The PDF library sits behind `PdfSource` so the page-joining rules can be
//! exercised without building real documents.

pub mod lopdf_source;

pub use lopdf_source::LopdfSource;

use crate::app_log;
use crate::error::ExtractionError;
use serde::Serialize;

/// A parsed PDF seen as ordered pages of ordered text fragments.
pub trait PdfSource {
    fn page_count(&self) -> u32;

    /// Text fragments of one page, in content order. Pages are 1-based.
    fn page_fragments(&self, page_number: u32) -> Result<Vec<String>, ExtractionError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    pub pages: Vec<String>,
    pub text: String,
}

impl ExtractedDocument {
    fn from_pages(pages: Vec<String>) -> Self {
        let text = pages.iter().fold(String::new(), |mut acc, page| {
            acc.push_str(page);
            acc.push('\n');
            acc
        });
        Self { pages, text }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// True when no page yielded anything but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Walk every page in order, space-joining its fragments.
///
/// Fails on the first page error; no partial text is returned.
pub fn extract_text<S: PdfSource>(source: &S) -> Result<ExtractedDocument, ExtractionError> {
    let page_count = source.page_count();
    let mut pages = Vec::with_capacity(page_count as usize);

    for page_number in 1..=page_count {
        let fragments = source.page_fragments(page_number)?;
        pages.push(fragments.join(" "));
    }

    Ok(ExtractedDocument::from_pages(pages))
}

/// Extract text from raw PDF bytes using the lopdf backend.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::EmptySelection);
    }

    let source = LopdfSource::load(bytes)?;
    extract_text(&source)
}

/// Run extraction on the blocking pool so request handlers stay responsive.
pub async fn extract_pdf_text_async(bytes: Vec<u8>) -> Result<ExtractedDocument, ExtractionError> {
    let byte_len = bytes.len();
    let document = tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))??;

    app_log!(
        info,
        "Extracted {} pages ({} chars) from {} bytes",
        document.page_count(),
        document.text.len(),
        byte_len
    );

    Ok(document)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory source; `failing_page` makes that page error out.
    pub(crate) struct FakePdf {
        pub pages: Vec<Vec<&'static str>>,
        pub failing_page: Option<u32>,
    }

    impl FakePdf {
        pub(crate) fn new(pages: Vec<Vec<&'static str>>) -> Self {
            Self {
                pages,
                failing_page: None,
            }
        }
    }

    impl PdfSource for FakePdf {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn page_fragments(&self, page_number: u32) -> Result<Vec<String>, ExtractionError> {
            if self.failing_page == Some(page_number) {
                return Err(ExtractionError::Page {
                    page: page_number,
                    reason: "unsupported encoding".to_string(),
                });
            }
            let index = page_number
                .checked_sub(1)
                .ok_or_else(|| ExtractionError::Load("page numbers start at 1".to_string()))?;
            Ok(self.pages[index as usize]
                .iter()
                .map(|s| s.to_string())
                .collect())
        }
    }

    #[test]
    fn test_pages_joined_in_order_with_trailing_newlines() {
        let pdf = FakePdf::new(vec![
            vec!["Jane", "Doe"],
            vec!["Rust", "Engineer", "2019-2024"],
            vec!["References"],
        ]);

        let doc = extract_text(&pdf).unwrap();

        assert_eq!(doc.text, "Jane Doe\nRust Engineer 2019-2024\nReferences\n");
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.pages[1], "Rust Engineer 2019-2024");
    }

    #[test]
    fn test_empty_page_still_gets_newline() {
        let pdf = FakePdf::new(vec![vec!["Summary"], vec![], vec!["Skills"]]);

        let doc = extract_text(&pdf).unwrap();

        assert_eq!(doc.text, "Summary\n\nSkills\n");
    }

    #[test]
    fn test_zero_pages_is_blank() {
        let pdf = FakePdf::new(vec![]);

        let doc = extract_text(&pdf).unwrap();

        assert!(doc.text.is_empty());
        assert!(doc.is_blank());
    }

    #[test]
    fn test_page_failure_discards_everything() {
        let mut pdf = FakePdf::new(vec![vec!["one"], vec!["two"], vec!["three"]]);
        pdf.failing_page = Some(2);

        let result = extract_text(&pdf);

        assert!(matches!(result, Err(ExtractionError::Page { page: 2, .. })));
    }

    #[test]
    fn test_empty_bytes_is_empty_selection() {
        let result = extract_pdf_text(&[]);
        assert!(matches!(result, Err(ExtractionError::EmptySelection)));
    }

    #[tokio::test]
    async fn test_async_extraction_maps_garbage_to_error() {
        let result = extract_pdf_text_async(b"definitely not a pdf".to_vec()).await;
        assert!(matches!(result, Err(ExtractionError::Load(_))));
    }
}
