//! Two-strategy PDF text recovery using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::Result;
use crate::error::PdfError;

/// Which strategy produced the recovered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Per-page lopdf extraction; preserves page grouping for the
    /// downstream table heuristic.
    Layout,
    /// Sequential whole-document pdf-extract text.
    Sequential,
}

/// Text recovered from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Strategy that produced the text; `None` when both failed.
    pub strategy: Option<ExtractionStrategy>,
    /// Full concatenated text.
    pub text: String,
    /// Per-page text blocks, in physical order.
    pub pages: Vec<PdfPage>,
}

impl PdfContent {
    fn empty() -> Self {
        Self {
            strategy: None,
            text: String::new(),
            pages: Vec::new(),
        }
    }

    /// True when neither strategy recovered any text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Content from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

/// PDF text extractor with automatic fallback.
///
/// The raw input bytes are retained on load so the fallback strategy can
/// re-read the stream from its start after the preferred strategy fails.
pub struct PdfTextExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfTextExtractor {
    /// Create a new extractor with no document loaded.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from bytes.
    ///
    /// A failed structural parse is not fatal: the raw bytes are kept and
    /// `extract` will go straight to the fallback strategy. Encryption
    /// with a non-empty password is the only unrecoverable load error.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        self.raw_data = data.to_vec();
        self.document = None;

        match Document::load_mem(data) {
            Ok(mut doc) => {
                // Handle PDFs with empty-password encryption.
                if doc.is_encrypted() {
                    if doc.decrypt("").is_err() {
                        return Err(PdfError::Encrypted);
                    }
                    debug!("decrypted PDF with empty password");

                    let mut decrypted = Vec::new();
                    doc.save_to(&mut decrypted)
                        .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {e}")))?;
                    self.raw_data = decrypted;
                }

                let page_count = doc.get_pages().len();
                debug!("loaded PDF with {} pages", page_count);
                self.document = Some(doc);
            }
            Err(e) => {
                warn!("lopdf could not parse the document, fallback only: {e}");
            }
        }
        Ok(())
    }

    /// Number of pages in the parsed document, 0 when the structural
    /// parse failed.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Recover text, trying the layout strategy first and falling back to
    /// sequential extraction over the retained bytes.
    ///
    /// Total: when both strategies fail the result is empty content,
    /// which downstream treats as "no records found", not an error.
    pub fn extract(&self) -> PdfContent {
        match self.extract_layout() {
            Ok(pages) => {
                let text = join_pages(&pages);
                if !text.trim().is_empty() {
                    debug!("layout strategy recovered {} chars", text.len());
                    return PdfContent {
                        strategy: Some(ExtractionStrategy::Layout),
                        text,
                        pages,
                    };
                }
                debug!("layout strategy recovered no text, trying fallback");
            }
            Err(e) => {
                warn!("layout strategy failed, trying fallback: {e}");
            }
        }

        match self.extract_sequential() {
            Ok(text) if !text.trim().is_empty() => {
                debug!("sequential strategy recovered {} chars", text.len());
                PdfContent {
                    strategy: Some(ExtractionStrategy::Sequential),
                    pages: vec![PdfPage {
                        number: 1,
                        text: text.clone(),
                    }],
                    text,
                }
            }
            Ok(_) => PdfContent::empty(),
            Err(e) => {
                warn!("both extraction strategies failed: {e}");
                PdfContent::empty()
            }
        }
    }

    /// Preferred strategy: per-page text through the parsed document.
    fn extract_layout(&self) -> Result<Vec<PdfPage>> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no structurally parsed document".to_string()))?;

        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(PdfError::NoPages);
        }

        let mut out = Vec::with_capacity(pages.len());
        for (&number, _) in pages.iter() {
            let text = doc
                .extract_text(&[number])
                .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
            out.push(PdfPage { number, text });
        }
        Ok(out)
    }

    /// Fallback strategy: sequential text over the raw bytes, re-read
    /// from the start of the stream.
    fn extract_sequential(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn join_pages(pages: &[PdfPage]) -> String {
    let mut text = String::new();
    for page in pages {
        if page.text.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(&page.text);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_extractor_has_no_document() {
        let extractor = PdfTextExtractor::new();
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_garbage_input_degrades_to_empty_content() {
        let mut extractor = PdfTextExtractor::new();
        extractor.load(b"this is not a pdf").unwrap();

        let content = extractor.extract();
        assert!(content.is_empty());
        assert!(content.strategy.is_none());
        assert!(content.pages.is_empty());
    }
}
