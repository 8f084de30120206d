//! Classification of account records against the taxonomy.

mod totals;
mod tree;

pub use totals::totals;
pub use tree::{ClassifiedTree, ReportRow, TreeNode};

use tracing::trace;

use crate::models::account::AccountRecord;
use crate::statement::rules::normalize_code;
use crate::taxonomy::{Taxonomy, TaxonomyNode};

/// The two statement sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Attivo.
    Assets,
    /// Passivo.
    Liabilities,
}

impl Section {
    /// Section name as used in the exchange format and output paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Assets => "attivo",
            Section::Liabilities => "passivo",
        }
    }
}

/// Where a record ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// A taxonomy node matched (pattern or keyword).
    Matched { section: Section, path: Vec<String> },
    /// Only the coarse keyword fallback matched.
    Fallback { section: Section, path: Vec<String> },
    /// Nothing matched; the record goes to the unclassified bucket.
    Unclassified,
}

/// Coarse fallback buckets tried only when the taxonomy walk finds no
/// match. First matching substring wins; `ammortament` is listed before
/// `fondo` so depreciation funds do not land in the provisions bucket.
const FALLBACK_BUCKETS: &[(&str, Section, &[&str])] = &[
    ("software", Section::Assets, &["immobilizzazioni", "immateriali"]),
    ("avviamento", Section::Assets, &["immobilizzazioni", "immateriali"]),
    ("brevett", Section::Assets, &["immobilizzazioni", "immateriali"]),
    ("cassa", Section::Assets, &["circolante", "disponibilita"]),
    ("banc", Section::Assets, &["circolante", "disponibilita"]),
    ("magazzino", Section::Assets, &["circolante", "rimanenze"]),
    ("rimanenz", Section::Assets, &["circolante", "rimanenze"]),
    ("client", Section::Assets, &["circolante", "crediti", "clienti"]),
    ("capitale", Section::Liabilities, &["patrimonio"]),
    ("riserv", Section::Liabilities, &["patrimonio"]),
    ("utili", Section::Liabilities, &["patrimonio"]),
    ("ammortament", Section::Liabilities, &["fondi_ammortamento"]),
    ("tfr", Section::Liabilities, &["fondi"]),
    ("fondo", Section::Liabilities, &["fondi"]),
    ("accantonament", Section::Liabilities, &["fondi"]),
    ("fornitor", Section::Liabilities, &["debiti"]),
    ("debit", Section::Liabilities, &["debiti"]),
    ("mutu", Section::Liabilities, &["debiti"]),
];

/// Classifies records against a loaded taxonomy.
///
/// The taxonomy is read-only for the classifier's lifetime; every run
/// owns its output tree, so classification is deterministic and free of
/// shared state.
pub struct Classifier<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> Classifier<'a> {
    /// Create a classifier over a loaded taxonomy.
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Decide where a record belongs without inserting it.
    ///
    /// Pass 1 walks the `attivo` tree and then the `passivo` tree in
    /// pre-order, first match wins. Pass 2 runs the coarse keyword table.
    /// Total: a record that matches nothing is reported unclassified,
    /// never an error.
    pub fn resolve(&self, record: &AccountRecord) -> Placement {
        let code = normalize_code(&record.code);
        let description = record.description.to_lowercase();

        for (section, root) in [
            (Section::Assets, &self.taxonomy.assets),
            (Section::Liabilities, &self.taxonomy.liabilities),
        ] {
            let mut path = Vec::new();
            if let Some(found) = find_match(root, &code, &description, &mut path) {
                let path = self.refine(root, found, &code);
                trace!("matched {} at {}.{}", code, section.as_str(), path.join("."));
                return Placement::Matched { section, path };
            }
        }

        for (keyword, section, bucket) in FALLBACK_BUCKETS {
            if description.contains(keyword) {
                trace!("fallback {} -> {}", keyword, bucket.join("."));
                return Placement::Fallback {
                    section: *section,
                    path: bucket.iter().map(|s| (*s).to_string()).collect(),
                };
            }
        }

        Placement::Unclassified
    }

    /// Classify a record and insert it into the tree; returns the
    /// placement that was applied.
    pub fn classify_into(&self, record: AccountRecord, tree: &mut ClassifiedTree) -> Placement {
        let placement = self.resolve(&record);
        match &placement {
            Placement::Matched { section, path } | Placement::Fallback { section, path } => {
                tree.insert(*section, path, record);
            }
            Placement::Unclassified => tree.unclassified.push(record),
        }
        placement
    }

    /// When the matched node still has children, its child code patterns
    /// pick the final list; with no child match the record stays at the
    /// internal bucket.
    fn refine(&self, root: &TaxonomyNode, mut path: Vec<String>, code: &str) -> Vec<String> {
        if let Some(node) = root.descend(&path) {
            if !node.is_leaf() {
                let refined = node.children.iter().find(|(_, child)| {
                    child
                        .pattern
                        .as_ref()
                        .is_some_and(|pattern| pattern.matches(code))
                });
                if let Some((name, _)) = refined {
                    path.push(name.clone());
                }
            }
        }
        path
    }
}

/// Pre-order walk: the node's own rule first, then every child in
/// declaration order, stopping at the first subtree that matches.
fn find_match(
    node: &TaxonomyNode,
    code: &str,
    description: &str,
    path: &mut Vec<String>,
) -> Option<Vec<String>> {
    if node.matches(code, description) {
        return Some(path.clone());
    }
    for (name, child) in &node.children {
        path.push(name.clone());
        if let Some(found) = find_match(child, code, description, path) {
            return Some(found);
        }
        path.pop();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn liquidity_taxonomy() -> Taxonomy {
        Taxonomy::from_json(
            r#"{
                "attivo": {
                    "liquidity": {"pattern": "1[-_](1|2)[-_]?\\d*", "voci": ["cassa", "banca"]}
                },
                "passivo": {}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_classifies_by_code_pattern() {
        let taxonomy = liquidity_taxonomy();
        let classifier = Classifier::new(&taxonomy);
        let record = AccountRecord::new("1-1-10", "Cassa contanti", 1500.00);

        let mut tree = ClassifiedTree::new();
        let placement = classifier.classify_into(record, &mut tree);

        assert_eq!(
            placement,
            Placement::Matched {
                section: Section::Assets,
                path: vec!["liquidity".to_string()],
            }
        );
        let rows = tree.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].section, "attivo.liquidity");
        assert_eq!(rows[0].amount, 1500.00);
    }

    #[test]
    fn test_classifies_by_keyword_when_pattern_misses() {
        let taxonomy = liquidity_taxonomy();
        let classifier = Classifier::new(&taxonomy);
        let record = AccountRecord::new("7-7-7", "Banca di prova c/c", 10.0);

        assert!(matches!(
            classifier.resolve(&record),
            Placement::Matched { section: Section::Assets, .. }
        ));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let taxonomy = Taxonomy::default_mapping();
        let classifier = Classifier::new(&taxonomy);
        let record = AccountRecord::new("2-2-1", "Debiti verso fornitori", 500.0);

        let first = classifier.resolve(&record);
        let second = classifier.resolve(&record);
        assert_eq!(first, second);
        assert!(matches!(first, Placement::Matched { section: Section::Liabilities, .. }));
    }

    #[test]
    fn test_unmatched_record_is_counted_not_dropped() {
        let taxonomy = liquidity_taxonomy();
        let classifier = Classifier::new(&taxonomy);
        let record = AccountRecord::new("9-99-1", "voce ignota", 42.0);

        let mut tree = ClassifiedTree::new();
        let placement = classifier.classify_into(record, &mut tree);

        assert_eq!(placement, Placement::Unclassified);
        assert!(tree.assets.is_empty());
        assert!(tree.liabilities.is_empty());
        assert_eq!(tree.unclassified.len(), 1);
        assert_eq!(totals(&tree).assets, 0.0);
    }

    #[test]
    fn test_internal_match_refines_through_child_patterns() {
        let taxonomy = Taxonomy::from_json(
            r#"{
                "attivo": {
                    "crediti": {
                        "voci": ["crediti"],
                        "clienti": {"pattern": "1[-_]3[-_]\\d+"},
                        "altri": {"pattern": "1[-_]5[-_]\\d+"}
                    }
                },
                "passivo": {}
            }"#,
        )
        .unwrap();
        let classifier = Classifier::new(&taxonomy);

        let placement = classifier.resolve(&AccountRecord::new("1-3-10", "Crediti commerciali", 1.0));
        assert_eq!(
            placement,
            Placement::Matched {
                section: Section::Assets,
                path: vec!["crediti".to_string(), "clienti".to_string()],
            }
        );

        // No child pattern matches: the record stays at the internal bucket.
        let placement = classifier.resolve(&AccountRecord::new("1-9-9", "Crediti diversi", 1.0));
        assert_eq!(
            placement,
            Placement::Matched {
                section: Section::Assets,
                path: vec!["crediti".to_string()],
            }
        );
    }

    #[test]
    fn test_keyword_fallback_buckets() {
        let taxonomy = Taxonomy::from_json(r#"{"attivo": {}, "passivo": {}}"#).unwrap();
        let classifier = Classifier::new(&taxonomy);

        let placement =
            classifier.resolve(&AccountRecord::new("5-5", "Fondo ammortamento impianti", 1.0));
        assert_eq!(
            placement,
            Placement::Fallback {
                section: Section::Liabilities,
                path: vec!["fondi_ammortamento".to_string()],
            }
        );

        let placement = classifier.resolve(&AccountRecord::new("5-6", "Fondo rischi", 1.0));
        assert_eq!(
            placement,
            Placement::Fallback {
                section: Section::Liabilities,
                path: vec!["fondi".to_string()],
            }
        );
    }

    #[test]
    fn test_default_mapping_end_to_end() {
        let taxonomy = Taxonomy::default_mapping();
        let classifier = Classifier::new(&taxonomy);
        let mut tree = ClassifiedTree::new();

        classifier.classify_into(AccountRecord::new("1-1-10", "Cassa contanti", 1500.0), &mut tree);
        classifier.classify_into(
            AccountRecord::new("2-2-1", "Debiti verso fornitori", 500.0),
            &mut tree,
        );

        let computed = totals(&tree);
        assert_eq!(computed.assets, 1500.0);
        assert_eq!(computed.liabilities, 500.0);
        assert_eq!(computed.balance_gap, 1000.0);
    }
}
