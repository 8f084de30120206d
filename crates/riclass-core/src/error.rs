//! Error types for the riclass-core library.

use thiserror::Error;

/// Main error type for the riclass library.
#[derive(Error, Debug)]
pub enum RiclassError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Record extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Taxonomy loading error.
    #[error("taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// Delimited-text reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file kind is not handled by any adapter.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF text recovery.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to tabular record extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A required column could not be located in the header row.
    #[error("no column matching {0:?} found in header row")]
    MissingColumn(&'static str),
}

/// Errors related to taxonomy loading.
#[derive(Error, Debug)]
pub enum TaxonomyError {
    /// The taxonomy document is not valid JSON.
    #[error("invalid taxonomy document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A node carries a pattern that does not compile.
    #[error("invalid pattern at node {path}: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },

    /// The document has a top-level key other than the two sections.
    #[error("unknown top-level section {0:?} (expected \"attivo\" and \"passivo\")")]
    UnknownRoot(String),

    /// A required top-level section is absent.
    #[error("missing top-level section {0:?}")]
    MissingRoot(&'static str),
}

/// Result type for the riclass library.
pub type Result<T> = std::result::Result<T, RiclassError>;
