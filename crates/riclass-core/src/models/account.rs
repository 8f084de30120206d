//! Account record and statement metadata models.

use serde::{Deserialize, Serialize};

/// A single ledger account recovered from an input source.
///
/// This is the only record shape that crosses the adapter boundary into
/// the classification core. The legacy Italian field names used by older
/// exports are accepted on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Account code, normalized to underscore-joined digit groups.
    #[serde(alias = "codice")]
    pub code: String,

    /// Account heading as printed in the source.
    #[serde(alias = "descrizione")]
    pub description: String,

    /// Signed balance.
    #[serde(alias = "valore")]
    pub amount: f64,
}

impl AccountRecord {
    /// Create a record from already-clean parts.
    pub fn new(code: impl Into<String>, description: impl Into<String>, amount: f64) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            amount,
        }
    }
}

/// General statement metadata recovered from document headers.
///
/// Every field is first-match-wins: once populated it is never
/// overwritten by a later page or block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Legal company name.
    #[serde(alias = "societa", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// Fiscal year (four digits).
    #[serde(alias = "esercizio", skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<String>,

    /// Closing date of the statement.
    #[serde(alias = "data_chiusura", skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<String>,

    /// VAT number (partita IVA, 11 digits).
    #[serde(alias = "partita_iva", skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,

    /// National tax code (codice fiscale).
    #[serde(alias = "codice_fiscale", skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
}

impl CompanyInfo {
    /// True when no field has been populated.
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.fiscal_year.is_none()
            && self.closing_date.is_none()
            && self.vat_number.is_none()
            && self.tax_code.is_none()
    }
}

/// Aggregate figures printed directly in the source text.
///
/// Used only as an external cross-check against the computed totals;
/// never fed into the classifier, never summed into the tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclaredTotals {
    /// Printed "totale attivo" line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_assets: Option<f64>,

    /// Printed "totale passivo" line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_liabilities: Option<f64>,

    /// Printed net equity line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<f64>,

    /// Printed profit line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,

    /// Printed loss line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss: Option<f64>,
}

impl DeclaredTotals {
    /// True when no aggregate line was found.
    pub fn is_empty(&self) -> bool {
        self.total_assets.is_none()
            && self.total_liabilities.is_none()
            && self.equity.is_none()
            && self.profit.is_none()
            && self.loss.is_none()
    }
}

/// Section totals derived from a classified tree.
///
/// Always recomputed from the tree, never stored independently of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of every classified asset account.
    pub assets: f64,

    /// Sum of every classified liability account.
    pub liabilities: f64,

    /// `assets - liabilities`; exactly zero for a balanced statement.
    pub balance_gap: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_legacy_field_names() {
        let json = r#"{"codice": "1-1-10", "descrizione": "Cassa", "valore": 1500.0}"#;
        let record: AccountRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.code, "1-1-10");
        assert_eq!(record.description, "Cassa");
        assert_eq!(record.amount, 1500.0);
    }

    #[test]
    fn test_company_info_is_empty() {
        let mut info = CompanyInfo::default();
        assert!(info.is_empty());
        info.vat_number = Some("01234567890".to_string());
        assert!(!info.is_empty());
    }
}
