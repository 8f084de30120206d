//! Tree aggregation into section totals.

use crate::models::account::Totals;

use super::tree::ClassifiedTree;

/// Sum a classified tree into section totals and the balance gap.
///
/// Recurses depth-first through every category; the unclassified bucket
/// and any declared totals carried outside the tree never contribute.
pub fn totals(tree: &ClassifiedTree) -> Totals {
    let assets = tree.assets.sum();
    let liabilities = tree.liabilities.sum();
    Totals {
        assets,
        liabilities,
        balance_gap: assets - liabilities,
    }
}
