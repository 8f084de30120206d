//! Data models shared across the extraction and classification pipeline.

pub mod account;
pub mod config;

pub use account::{AccountRecord, CompanyInfo, DeclaredTotals, Totals};
pub use config::{CsvConfig, ExtractionConfig, PdfConfig, RiclassConfig};
