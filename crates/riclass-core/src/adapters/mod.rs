//! Input adapters: every supported source kind is reduced to a
//! [`ParseResult`] before it reaches the classifier.
//!
//! Tabular sources (delimited text, JSON exports) are simple column
//! mappers; only the PDF adapter runs the full text-recovery pipeline.

mod csv;
mod json;
mod pdf;

pub use csv::CsvAdapter;
pub use json::JsonAdapter;
pub use pdf::PdfAdapter;

use crate::error::{Result, RiclassError};
use crate::models::config::RiclassConfig;
use crate::statement::ParseResult;

/// A source adapter turns raw file bytes into extracted records.
pub trait SourceAdapter: std::fmt::Debug {
    /// Parse the input bytes into records, metadata and declared totals.
    fn parse(&self, data: &[u8]) -> Result<ParseResult>;
}

/// Pick the adapter for a file extension.
///
/// An unknown extension is a caller-facing configuration error, surfaced
/// immediately and never retried.
pub fn adapter_for_extension(
    extension: &str,
    config: &RiclassConfig,
) -> Result<Box<dyn SourceAdapter>> {
    match extension.to_lowercase().as_str() {
        "csv" => Ok(Box::new(CsvAdapter::new(config.csv.clone()))),
        "json" => Ok(Box::new(JsonAdapter::new())),
        "pdf" => Ok(Box::new(PdfAdapter::new(
            config.pdf.clone(),
            config.extraction.clone(),
        ))),
        other => Err(RiclassError::UnsupportedFormat(other.to_string())),
    }
}
