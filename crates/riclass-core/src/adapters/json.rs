//! JSON adapter for structured account exports.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::models::account::{AccountRecord, CompanyInfo};
use crate::statement::rules::normalize_code;
use crate::statement::ParseResult;

use super::SourceAdapter;

/// Object-shaped export: metadata plus a record list. Legacy exports use
/// the Italian `info`/`conti` keys.
#[derive(Debug, Deserialize)]
struct JsonExport {
    #[serde(default, alias = "info")]
    company: CompanyInfo,
    #[serde(default, alias = "conti")]
    records: Vec<AccountRecord>,
}

/// Reads a JSON document that is either a bare array of records or an
/// object carrying records plus company metadata.
#[derive(Debug)]
pub struct JsonAdapter;

impl JsonAdapter {
    /// Create the adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAdapter for JsonAdapter {
    fn parse(&self, data: &[u8]) -> Result<ParseResult> {
        let (company, records) = match serde_json::from_slice::<Vec<AccountRecord>>(data) {
            Ok(records) => (CompanyInfo::default(), records),
            Err(_) => {
                let export: JsonExport = serde_json::from_slice(data)?;
                (export.company, export.records)
            }
        };

        let mut result = ParseResult {
            company,
            ..ParseResult::default()
        };
        for mut record in records {
            record.code = normalize_code(&record.code);
            if record.code.is_empty() || record.amount == 0.0 {
                continue;
            }
            result.records.push(record);
        }

        debug!("JSON adapter produced {} records", result.records.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_record_array() {
        let data = br#"[{"code": "1-1-10", "description": "Cassa", "amount": 1500.0}]"#;
        let result = JsonAdapter::new().parse(data).unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].code, "1_1_10");
    }

    #[test]
    fn test_legacy_export_object() {
        let data = br#"{
            "info": {"societa": "Rossi S.r.l.", "esercizio": "2023"},
            "conti": [
                {"codice": "1-1-10", "descrizione": "Cassa", "valore": 1500.0},
                {"codice": "", "descrizione": "Scartato", "valore": 10.0}
            ]
        }"#;
        let result = JsonAdapter::new().parse(data).unwrap();

        assert_eq!(result.company.company_name.as_deref(), Some("Rossi S.r.l."));
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].description, "Cassa");
    }

    #[test]
    fn test_invalid_document_is_an_error() {
        assert!(JsonAdapter::new().parse(b"not json").is_err());
    }
}
