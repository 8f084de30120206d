//! The CEE category taxonomy: a user-editable, arbitrarily nested tree
//! of code patterns and description keywords.
//!
//! The exchange format is plain JSON. Every object key except the
//! reserved `pattern` and `voci` names a child category; child order is
//! the document order and drives the classifier's first-match-wins walk.
//! Patterns are compiled once at load time; an invalid pattern fails the
//! load naming the offending node.

mod default;

pub use default::DEFAULT_TAXONOMY_JSON;

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TaxonomyError;

/// A code pattern compiled for matching anchored at the start of a
/// normalized account code.
#[derive(Debug, Clone)]
pub struct CodePattern {
    raw: String,
    regex: Regex,
}

impl CodePattern {
    /// Compile a raw pattern, pinning it to the start of the code.
    pub fn compile(raw: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{raw})"))?;
        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    /// The pattern as written in the taxonomy document.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True when the normalized code matches from its first character.
    pub fn matches(&self, code: &str) -> bool {
        self.regex.is_match(code)
    }
}

impl PartialEq for CodePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

/// One taxonomy category. A node may match records directly through its
/// own pattern/keywords and may also contain child categories; both are
/// checked by the classifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxonomyNode {
    /// Optional code pattern, anchored at the start of the code.
    pub pattern: Option<CodePattern>,
    /// Ordered lowercase substrings matched against the description.
    pub keywords: Vec<String>,
    /// Child categories in document order.
    pub children: Vec<(String, TaxonomyNode)>,
}

impl TaxonomyNode {
    /// True when the node has no child categories.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True when this node directly matches the record.
    ///
    /// `description` must already be lowercased.
    pub fn matches(&self, code: &str, description: &str) -> bool {
        if let Some(pattern) = &self.pattern {
            if pattern.matches(code) {
                return true;
            }
        }
        self.keywords.iter().any(|k| description.contains(k.as_str()))
    }

    /// Look up a child by name.
    pub fn child(&self, name: &str) -> Option<&TaxonomyNode> {
        self.children
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    /// Follow a path of child names from this node.
    pub fn descend(&self, path: &[String]) -> Option<&TaxonomyNode> {
        let mut node = self;
        for name in path {
            node = node.child(name)?;
        }
        Some(node)
    }

    /// Number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|(_, child)| child.node_count())
            .sum::<usize>()
    }
}

/// The full taxonomy: the two statement sections and their category trees.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    /// The `attivo` root.
    pub assets: TaxonomyNode,
    /// The `passivo` root.
    pub liabilities: TaxonomyNode,
}

lazy_static! {
    static ref DEFAULT_TAXONOMY: Taxonomy =
        Taxonomy::from_json(DEFAULT_TAXONOMY_JSON).expect("embedded default taxonomy is valid");
}

impl Taxonomy {
    /// Load a taxonomy from its JSON exchange form, compiling every
    /// pattern. Fails fast on the first invalid pattern, naming the node.
    pub fn from_json(text: &str) -> Result<Self, TaxonomyError> {
        let raw: RawTaxonomy = serde_json::from_str(text)?;

        let mut assets = None;
        let mut liabilities = None;
        for (name, node) in raw.roots {
            match name.as_str() {
                "attivo" => {
                    let mut path = vec![name.clone()];
                    assets = Some(compile_node(node, &mut path)?);
                }
                "passivo" => {
                    let mut path = vec![name.clone()];
                    liabilities = Some(compile_node(node, &mut path)?);
                }
                _ => return Err(TaxonomyError::UnknownRoot(name)),
            }
        }

        Ok(Self {
            assets: assets.ok_or(TaxonomyError::MissingRoot("attivo"))?,
            liabilities: liabilities.ok_or(TaxonomyError::MissingRoot("passivo"))?,
        })
    }

    /// Serialize back to the JSON exchange form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The built-in CEE mapping.
    pub fn default_mapping() -> Self {
        DEFAULT_TAXONOMY.clone()
    }

    /// Total number of category nodes across both sections.
    pub fn node_count(&self) -> usize {
        self.assets.node_count() + self.liabilities.node_count()
    }
}

/// Uncompiled node, exactly as read from the document.
#[derive(Debug, Default)]
struct RawNode {
    pattern: Option<String>,
    keywords: Vec<String>,
    children: Vec<(String, RawNode)>,
}

fn compile_node(raw: RawNode, path: &mut Vec<String>) -> Result<TaxonomyNode, TaxonomyError> {
    let pattern = match raw.pattern {
        Some(p) => Some(
            CodePattern::compile(&p).map_err(|source| TaxonomyError::InvalidPattern {
                path: path.join("."),
                source,
            })?,
        ),
        None => None,
    };

    let keywords = raw
        .keywords
        .into_iter()
        .map(|k| k.to_lowercase())
        .collect();

    let mut children = Vec::with_capacity(raw.children.len());
    for (name, child) in raw.children {
        path.push(name.clone());
        let compiled = compile_node(child, path)?;
        path.pop();
        children.push((name, compiled));
    }

    Ok(TaxonomyNode {
        pattern,
        keywords,
        children,
    })
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = RawNode;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a taxonomy node object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<RawNode, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut node = RawNode::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "pattern" => node.pattern = Some(map.next_value()?),
                        "voci" => node.keywords = map.next_value()?,
                        _ => node.children.push((key, map.next_value()?)),
                    }
                }
                Ok(node)
            }
        }

        deserializer.deserialize_map(NodeVisitor)
    }
}

/// Top-level document: an ordered list of section roots.
#[derive(Debug, Default)]
struct RawTaxonomy {
    roots: Vec<(String, RawNode)>,
}

impl<'de> Deserialize<'de> for RawTaxonomy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RootVisitor;

        impl<'de> Visitor<'de> for RootVisitor {
            type Value = RawTaxonomy;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a taxonomy document object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<RawTaxonomy, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut doc = RawTaxonomy::default();
                while let Some(key) = map.next_key::<String>()? {
                    doc.roots.push((key, map.next_value()?));
                }
                Ok(doc)
            }
        }

        deserializer.deserialize_map(RootVisitor)
    }
}

impl Serialize for TaxonomyNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut len = self.children.len();
        if self.pattern.is_some() {
            len += 1;
        }
        if !self.keywords.is_empty() {
            len += 1;
        }

        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(pattern) = &self.pattern {
            map.serialize_entry("pattern", pattern.raw())?;
        }
        if !self.keywords.is_empty() {
            map.serialize_entry("voci", &self.keywords)?;
        }
        for (name, child) in &self.children {
            map.serialize_entry(name, child)?;
        }
        map.end()
    }
}

impl Serialize for Taxonomy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("attivo", &self.assets)?;
        map.serialize_entry("passivo", &self.liabilities)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_taxonomy_compiles() {
        let taxonomy = Taxonomy::default_mapping();
        assert!(taxonomy.node_count() > 10);
        assert!(taxonomy.assets.child("circolante").is_some());
        assert!(taxonomy.liabilities.child("debiti").is_some());
    }

    #[test]
    fn test_round_trip_is_structurally_stable() {
        let taxonomy = Taxonomy::default_mapping();
        let json = taxonomy.to_json().unwrap();
        let reloaded = Taxonomy::from_json(&json).unwrap();
        assert_eq!(reloaded, taxonomy);
        assert_eq!(reloaded.to_json().unwrap(), json);
    }

    #[test]
    fn test_child_order_is_document_order() {
        let json = r#"{
            "attivo": {
                "zeta": {"pattern": "9"},
                "alfa": {"pattern": "1"}
            },
            "passivo": {}
        }"#;
        let taxonomy = Taxonomy::from_json(json).unwrap();
        let names: Vec<&str> = taxonomy
            .assets
            .children
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, ["zeta", "alfa"]);
    }

    #[test]
    fn test_invalid_pattern_names_the_node() {
        let json = r#"{
            "attivo": {
                "circolante": {
                    "crediti": {"pattern": "1[-_](3|4"}
                }
            },
            "passivo": {}
        }"#;
        let err = Taxonomy::from_json(json).unwrap_err();
        match err {
            TaxonomyError::InvalidPattern { path, .. } => {
                assert_eq!(path, "attivo.circolante.crediti");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_root_is_rejected() {
        let err = Taxonomy::from_json(r#"{"attivo": {}, "conto_economico": {}}"#).unwrap_err();
        assert!(matches!(err, TaxonomyError::UnknownRoot(name) if name == "conto_economico"));
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let err = Taxonomy::from_json(r#"{"attivo": {}}"#).unwrap_err();
        assert!(matches!(err, TaxonomyError::MissingRoot("passivo")));
    }

    #[test]
    fn test_keywords_are_lowercased_at_load() {
        let json = r#"{"attivo": {"liquidita": {"voci": ["CASSA"]}}, "passivo": {}}"#;
        let taxonomy = Taxonomy::from_json(json).unwrap();
        let node = taxonomy.assets.child("liquidita").unwrap();
        assert!(node.matches("", "cassa contanti"));
    }

    #[test]
    fn test_node_matches_pattern_from_start_only() {
        let node = TaxonomyNode {
            pattern: Some(CodePattern::compile(r"1[-_](1|2)[-_]?\d*").unwrap()),
            keywords: vec![],
            children: vec![],
        };
        assert!(node.matches("1_1_10", ""));
        assert!(!node.matches("9_1_1", ""));
    }
}
