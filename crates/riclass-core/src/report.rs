//! Final report assembly: classified tree, recomputed totals and the
//! declared-total cross-check.

use serde::Serialize;
use tracing::info;

use crate::classify::{totals, ClassifiedTree, Classifier, ReportRow};
use crate::models::account::{CompanyInfo, DeclaredTotals, Totals};
use crate::statement::rules::format_amount;
use crate::statement::ParseResult;
use crate::taxonomy::Taxonomy;

/// Tolerance applied when comparing declared and computed totals.
const CROSS_CHECK_TOLERANCE: f64 = 0.01;

/// The reclassified statement.
///
/// Totals are derived from the tree at build time and recomputed on
/// every rebuild; they are never carried independently of it.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    /// Statement metadata.
    pub company: CompanyInfo,
    /// Printed aggregate lines, kept outside the tree.
    pub declared: DeclaredTotals,
    /// The classified tree, unclassified bucket included.
    pub tree: ClassifiedTree,
    /// Section totals and balance gap.
    pub totals: Totals,
    /// How many records no rule matched.
    pub unclassified_count: usize,
}

impl BalanceReport {
    /// Classify every extracted record and assemble the report.
    pub fn build(parsed: ParseResult, taxonomy: &Taxonomy) -> Self {
        let classifier = Classifier::new(taxonomy);
        let mut tree = ClassifiedTree::new();

        let record_count = parsed.records.len();
        for record in parsed.records {
            classifier.classify_into(record, &mut tree);
        }

        let totals = totals(&tree);
        let unclassified_count = tree.unclassified.len();
        info!(
            "classified {} of {} records, balance gap {}",
            record_count - unclassified_count,
            record_count,
            format_amount(totals.balance_gap)
        );

        Self {
            company: parsed.company,
            declared: parsed.declared,
            tree,
            totals,
            unclassified_count,
        }
    }

    /// Flat tabular listing for spreadsheet or printable rendering.
    pub fn rows(&self) -> Vec<ReportRow> {
        self.tree.rows()
    }

    /// Compare computed totals with the aggregate lines printed in the
    /// source, one warning per disagreement.
    pub fn cross_check(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(declared) = self.declared.total_assets {
            if (declared - self.totals.assets).abs() > CROSS_CHECK_TOLERANCE {
                warnings.push(format!(
                    "declared total assets {} differ from computed {}",
                    format_amount(declared),
                    format_amount(self.totals.assets)
                ));
            }
        }
        if let Some(declared) = self.declared.total_liabilities {
            if (declared - self.totals.liabilities).abs() > CROSS_CHECK_TOLERANCE {
                warnings.push(format!(
                    "declared total liabilities {} differ from computed {}",
                    format_amount(declared),
                    format_amount(self.totals.liabilities)
                ));
            }
        }

        warnings
    }
}
