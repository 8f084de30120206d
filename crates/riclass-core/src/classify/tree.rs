//! The classified output tree mirroring the taxonomy's shape.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::account::AccountRecord;

use super::Section;

/// One node of the classified tree.
///
/// Leaf positions hold their records directly; an internal category can
/// also hold records of its own (the internal bucket) next to its
/// children. Record lists are append-only and preserve insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    /// Records placed directly at this category.
    pub records: Vec<AccountRecord>,
    /// Child categories in creation order.
    pub children: Vec<(String, TreeNode)>,
}

impl TreeNode {
    /// Find a child by name, creating it at the end when absent.
    fn child_mut(&mut self, name: &str) -> &mut TreeNode {
        let idx = match self.children.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.children.push((name.to_string(), TreeNode::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[idx].1
    }

    /// Depth-first sum of this subtree.
    pub fn sum(&self) -> f64 {
        let own: f64 = self.records.iter().map(|r| r.amount).sum();
        own + self.children.iter().map(|(_, c)| c.sum()).sum::<f64>()
    }

    /// True when the subtree holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.children.iter().all(|(_, c)| c.is_empty())
    }
}

/// The classified statement: both section trees plus the explicit bucket
/// of records nothing matched. Unclassified records stay visible but are
/// excluded from every total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedTree {
    /// The `attivo` section.
    pub assets: TreeNode,
    /// The `passivo` section.
    pub liabilities: TreeNode,
    /// Records no rule and no fallback keyword matched.
    pub unclassified: Vec<AccountRecord>,
}

/// One flat output row for tabular rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Dot-joined category path (e.g. `attivo.circolante.disponibilita`).
    pub section: String,
    /// Normalized account code.
    pub code: String,
    /// Account heading.
    pub description: String,
    /// Signed balance.
    pub amount: f64,
}

impl ClassifiedTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the category reached by walking `path` from the
    /// section root, creating intermediate nodes as needed.
    pub fn insert(&mut self, section: Section, path: &[String], record: AccountRecord) {
        let mut node = self.section_mut(section);
        for name in path {
            node = node.child_mut(name);
        }
        node.records.push(record);
    }

    fn section_mut(&mut self, section: Section) -> &mut TreeNode {
        match section {
            Section::Assets => &mut self.assets,
            Section::Liabilities => &mut self.liabilities,
        }
    }

    /// Flatten the tree into tabular rows, depth-first, unclassified
    /// records last.
    pub fn rows(&self) -> Vec<ReportRow> {
        let mut rows = Vec::new();
        let mut path = vec![Section::Assets.as_str().to_string()];
        collect_rows(&self.assets, &mut path, &mut rows);
        path = vec![Section::Liabilities.as_str().to_string()];
        collect_rows(&self.liabilities, &mut path, &mut rows);

        for record in &self.unclassified {
            rows.push(ReportRow {
                section: "non_classificati".to_string(),
                code: record.code.clone(),
                description: record.description.clone(),
                amount: record.amount,
            });
        }
        rows
    }
}

fn collect_rows(node: &TreeNode, path: &mut Vec<String>, rows: &mut Vec<ReportRow>) {
    let section = path.join(".");
    for record in &node.records {
        rows.push(ReportRow {
            section: section.clone(),
            code: record.code.clone(),
            description: record.description.clone(),
            amount: record.amount,
        });
    }
    for (name, child) in &node.children {
        path.push(name.clone());
        collect_rows(child, path, rows);
        path.pop();
    }
}

impl Serialize for TreeNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Leaves serialize as their record list, matching the taxonomy
        // exchange shape; internal buckets keep their records under
        // "conti" next to the child categories.
        if self.children.is_empty() {
            return self.records.serialize(serializer);
        }

        let mut len = self.children.len();
        if !self.records.is_empty() {
            len += 1;
        }
        let mut map = serializer.serialize_map(Some(len))?;
        if !self.records.is_empty() {
            map.serialize_entry("conti", &self.records)?;
        }
        for (name, child) in &self.children {
            map.serialize_entry(name, child)?;
        }
        map.end()
    }
}

impl Serialize for ClassifiedTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("attivo", &self.assets)?;
        map.serialize_entry("passivo", &self.liabilities)?;
        map.serialize_entry("non_classificati", &self.unclassified)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, description: &str, amount: f64) -> AccountRecord {
        AccountRecord::new(code, description, amount)
    }

    #[test]
    fn test_insert_creates_intermediate_nodes() {
        let mut tree = ClassifiedTree::new();
        let path = vec!["circolante".to_string(), "disponibilita".to_string()];
        tree.insert(Section::Assets, &path, record("1_1_10", "Cassa", 100.0));

        let node = tree
            .assets
            .children
            .iter()
            .find(|(n, _)| n == "circolante")
            .map(|(_, n)| n)
            .unwrap();
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].1.records.len(), 1);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut tree = ClassifiedTree::new();
        let path = vec!["disponibilita".to_string()];
        tree.insert(Section::Assets, &path, record("1_1_10", "Cassa", 100.0));
        tree.insert(Section::Assets, &path, record("1_2_10", "Banca", 200.0));

        let rows = tree.rows();
        assert_eq!(rows[0].code, "1_1_10");
        assert_eq!(rows[1].code, "1_2_10");
    }

    #[test]
    fn test_rows_join_the_path_and_list_unclassified_last() {
        let mut tree = ClassifiedTree::new();
        tree.insert(
            Section::Assets,
            &["circolante".to_string(), "disponibilita".to_string()],
            record("1_1_10", "Cassa", 100.0),
        );
        tree.unclassified.push(record("9_99_1", "voce ignota", 5.0));

        let rows = tree.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].section, "attivo.circolante.disponibilita");
        assert_eq!(rows[1].section, "non_classificati");
    }

    #[test]
    fn test_serializes_leaves_as_record_lists() {
        let mut tree = ClassifiedTree::new();
        tree.insert(
            Section::Assets,
            &["circolante".to_string(), "disponibilita".to_string()],
            record("1_1_10", "Cassa", 100.0),
        );

        let value = serde_json::to_value(&tree).unwrap();
        assert!(value["attivo"]["circolante"]["disponibilita"].is_array());
        assert_eq!(
            value["attivo"]["circolante"]["disponibilita"][0]["code"],
            "1_1_10"
        );
        assert!(value["non_classificati"].is_array());
    }

    #[test]
    fn test_internal_bucket_serializes_under_conti() {
        let mut tree = ClassifiedTree::new();
        tree.insert(
            Section::Liabilities,
            &["debiti".to_string()],
            record("2_9_9", "Debiti diversi", 10.0),
        );
        tree.insert(
            Section::Liabilities,
            &["debiti".to_string(), "fornitori".to_string()],
            record("2_2_1", "Fornitori", 20.0),
        );

        let value = serde_json::to_value(&tree).unwrap();
        assert!(value["passivo"]["debiti"]["conti"].is_array());
        assert!(value["passivo"]["debiti"]["fornitori"].is_array());
    }

    #[test]
    fn test_subtree_sum() {
        let mut tree = ClassifiedTree::new();
        tree.insert(Section::Assets, &["a".to_string()], record("1", "Uno", 1.5));
        tree.insert(
            Section::Assets,
            &["a".to_string(), "b".to_string()],
            record("2", "Due", 2.5),
        );
        assert_eq!(tree.assets.sum(), 4.0);
    }
}
