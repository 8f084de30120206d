//! PDF adapter: text recovery composed with the statement parser.

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::config::{ExtractionConfig, PdfConfig};
use crate::pdf::PdfTextExtractor;
use crate::statement::{BalanceParser, ParseResult};

use super::SourceAdapter;

/// Runs the full document pipeline: two-strategy text recovery, then
/// per-page record extraction.
#[derive(Debug)]
pub struct PdfAdapter {
    config: PdfConfig,
    parser: BalanceParser,
}

impl PdfAdapter {
    /// Create the adapter.
    pub fn new(config: PdfConfig, extraction: ExtractionConfig) -> Self {
        Self {
            config,
            parser: BalanceParser::with_config(extraction),
        }
    }
}

impl SourceAdapter for PdfAdapter {
    fn parse(&self, data: &[u8]) -> Result<ParseResult> {
        let mut extractor = PdfTextExtractor::new();
        extractor.load(data)?;

        let content = extractor.extract();
        if content.is_empty() {
            debug!("no text recovered from PDF, returning no records");
            return Ok(ParseResult::default());
        }
        if content.text.len() < self.config.min_text_length {
            warn!(
                "recovered only {} chars of text, extraction may be incomplete",
                content.text.len()
            );
        }

        let pages = if self.config.max_pages > 0 && content.pages.len() > self.config.max_pages {
            warn!(
                "scanning only the first {} of {} pages",
                self.config.max_pages,
                content.pages.len()
            );
            &content.pages[..self.config.max_pages]
        } else {
            &content.pages[..]
        };

        Ok(self.parser.parse_blocks(pages.iter().map(|p| p.text.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::RiclassConfig;

    #[test]
    fn test_unreadable_pdf_yields_no_records_not_an_error() {
        let config = RiclassConfig::default();
        let adapter = PdfAdapter::new(config.pdf, config.extraction);

        let result = adapter.parse(b"not a pdf at all").unwrap();
        assert!(result.records.is_empty());
        assert!(result.company.is_empty());
    }
}
