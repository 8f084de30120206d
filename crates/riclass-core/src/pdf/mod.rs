//! PDF text recovery.

mod extractor;

pub use extractor::{ExtractionStrategy, PdfContent, PdfPage, PdfTextExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;
