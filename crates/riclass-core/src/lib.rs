//! Core library for CEE balance-sheet reclassification.
//!
//! This crate provides:
//! - PDF text recovery with a two-strategy fallback (lopdf / pdf-extract)
//! - record extraction from noisy statement text (codes, headings, amounts)
//! - a user-editable nested taxonomy of code patterns and keywords
//! - deterministic classification into the CEE assets/liabilities tree
//! - recursive aggregation with a balance-gap cross-check

pub mod adapters;
pub mod classify;
pub mod error;
pub mod models;
pub mod pdf;
pub mod report;
pub mod statement;
pub mod taxonomy;

pub use adapters::{adapter_for_extension, CsvAdapter, JsonAdapter, PdfAdapter, SourceAdapter};
pub use classify::{totals, ClassifiedTree, Classifier, Placement, ReportRow, Section, TreeNode};
pub use error::{Result, RiclassError};
pub use models::account::{AccountRecord, CompanyInfo, DeclaredTotals, Totals};
pub use models::config::RiclassConfig;
pub use pdf::{ExtractionStrategy, PdfContent, PdfPage, PdfTextExtractor};
pub use report::BalanceReport;
pub use statement::rules::{format_amount, normalize_code, parse_amount};
pub use statement::{BalanceParser, ParseResult};
pub use taxonomy::{Taxonomy, TaxonomyNode};
