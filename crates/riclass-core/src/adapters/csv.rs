//! Delimited-text adapter: a header-driven column mapper.

use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::models::account::AccountRecord;
use crate::models::config::CsvConfig;
use crate::statement::rules::{normalize_code, parse_amount};
use crate::statement::ParseResult;

use super::SourceAdapter;

/// Header substrings accepted for the account-code column.
const CODE_COLUMNS: &[&str] = &["codice", "conto", "code", "account"];
/// Header substrings accepted for the description column.
const DESCRIPTION_COLUMNS: &[&str] = &["descr", "intestaz", "desc", "heading"];
/// Header substrings accepted for the amount column.
const AMOUNT_COLUMNS: &[&str] = &[
    "saldo", "importo", "valore", "dare", "avere", "amount", "balance", "debit", "credit",
];

/// Reads `;`-delimited (configurable) account exports.
#[derive(Debug)]
pub struct CsvAdapter {
    config: CsvConfig,
}

impl CsvAdapter {
    /// Create an adapter with the given delimiter configuration.
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl SourceAdapter for CsvAdapter {
    fn parse(&self, data: &[u8]) -> Result<ParseResult> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter as u8)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        let code_idx = find_column(&headers, CODE_COLUMNS)
            .ok_or(ExtractionError::MissingColumn("codice/conto"))?;
        let amount_idx = find_column(&headers, AMOUNT_COLUMNS)
            .ok_or(ExtractionError::MissingColumn("saldo/importo"))?;
        let description_idx = find_column(&headers, DESCRIPTION_COLUMNS);

        debug!(
            "mapped columns: code={}, amount={}, description={:?}",
            code_idx, amount_idx, description_idx
        );

        let mut result = ParseResult::default();
        for row in reader.records() {
            let row = row?;

            let code = normalize_code(row.get(code_idx).unwrap_or(""));
            if code.is_empty() {
                continue;
            }
            let amount = parse_amount(row.get(amount_idx).unwrap_or(""));
            if amount == 0.0 {
                continue;
            }
            let description = description_idx
                .and_then(|idx| row.get(idx))
                .unwrap_or("")
                .trim()
                .to_string();

            result.records.push(AccountRecord {
                code,
                description,
                amount,
            });
        }

        debug!("CSV adapter produced {} records", result.records.len());
        Ok(result)
    }
}

fn find_column(headers: &csv::StringRecord, keywords: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let lower = header.to_lowercase();
        keywords.iter().any(|k| lower.contains(k))
    })
}
