//! Semantic token tree
//!
//! A nested, insertion-ordered map from key to either a group or a leaf.
//! Leaves carry an explicit `kind` tag so traversal is an exhaustive match
//! rather than a guess based on which fields happen to be present.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::{ColorToken, Responsive};
use crate::error::TokenLoadError;

/// A plain value emitted unchanged for every scheme and breakpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Number(f64),
    Str(String),
}

impl Display for ScalarValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            // 400.0 -> "400", 1.5 -> "1.5"
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u16> for ScalarValue {
    fn from(value: u16) -> Self {
        Self::Number(f64::from(value))
    }
}

/// A terminal entry of the token tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TokenLeaf {
    /// Scheme-dependent color
    Color(ColorToken),
    /// Breakpoint-dependent value
    Responsive(Responsive<ScalarValue>),
    /// Constant value
    Scalar { value: ScalarValue },
}

impl TokenLeaf {
    pub fn scalar(value: impl Into<ScalarValue>) -> Self {
        Self::Scalar {
            value: value.into(),
        }
    }

    pub fn responsive(
        mobile: impl Into<ScalarValue>,
        tablet: impl Into<ScalarValue>,
        desktop: impl Into<ScalarValue>,
    ) -> Self {
        Self::Responsive(Responsive::new(mobile.into(), tablet.into(), desktop.into()))
    }

    /// Tag name, matching the serialized `kind` field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Responsive(_) => "responsive",
            Self::Scalar { .. } => "scalar",
        }
    }
}

/// Either a leaf or a nested group
///
/// On the wire an object with a string `kind` field is a leaf and any other
/// object is a group. Deserialization dispatches on that rule, so a broken
/// leaf reports its own field error together with its dotted path.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenNode {
    Leaf(TokenLeaf),
    Group(TokenTree),
}

impl<'de> Deserialize<'de> for TokenNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        node_from_value(value).map_err(D::Error::custom)
    }
}

/// Failure to interpret part of a token document
#[derive(Debug)]
struct NodeError {
    path: Vec<String>,
    message: String,
}

impl Display for NodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

fn node_from_value(value: serde_json::Value) -> Result<TokenNode, NodeError> {
    let map = match value {
        serde_json::Value::Object(map) => map,
        other => {
            return Err(NodeError {
                path: Vec::new(),
                message: format!("expected a token group or a leaf with a `kind` field, found {other}"),
            })
        }
    };

    if map.get("kind").is_some_and(serde_json::Value::is_string) {
        return TokenLeaf::deserialize(serde_json::Value::Object(map))
            .map(TokenNode::Leaf)
            .map_err(|err| NodeError {
                path: Vec::new(),
                message: err.to_string(),
            });
    }

    let mut tree = TokenTree::new();
    for (key, child) in map {
        let node = node_from_value(child).map_err(|mut err| {
            err.path.insert(0, key.clone());
            err
        })?;
        tree.insert(key, node);
    }
    Ok(TokenNode::Group(tree))
}

impl From<TokenLeaf> for TokenNode {
    fn from(leaf: TokenLeaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<ColorToken> for TokenNode {
    fn from(color: ColorToken) -> Self {
        Self::Leaf(TokenLeaf::Color(color))
    }
}

impl From<Responsive<ScalarValue>> for TokenNode {
    fn from(value: Responsive<ScalarValue>) -> Self {
        Self::Leaf(TokenLeaf::Responsive(value))
    }
}

impl From<ScalarValue> for TokenNode {
    fn from(value: ScalarValue) -> Self {
        Self::Leaf(TokenLeaf::Scalar { value })
    }
}

impl From<TokenTree> for TokenNode {
    fn from(tree: TokenTree) -> Self {
        Self::Group(tree)
    }
}

/// One leaf reached by [`TokenTree::leaves`], with the keys leading to it
#[derive(Clone, Debug)]
pub struct LeafEntry<'a> {
    pub path: Vec<&'a str>,
    pub leaf: &'a TokenLeaf,
}

impl LeafEntry<'_> {
    /// Dot-joined path, e.g. `colors.action.primary`
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

/// Insertion-ordered tree of semantic tokens
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenTree {
    nodes: IndexMap<String, TokenNode>,
}

impl<'de> Deserialize<'de> for TokenTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match TokenNode::deserialize(deserializer)? {
            TokenNode::Group(tree) => Ok(tree),
            TokenNode::Leaf(_) => Err(D::Error::custom(
                "expected a token group at the top level, found a leaf",
            )),
        }
    }
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a child, keeping the original position on replace
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<TokenNode>) {
        self.nodes.insert(key.into(), node.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, node: impl Into<TokenNode>) -> Self {
        self.insert(key, node);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenNode)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a node by dot-separated path, e.g. `colors.text.primary`
    pub fn get(&self, path: &str) -> Option<&TokenNode> {
        let mut segments = path.split('.');
        let mut node = self.nodes.get(segments.next()?)?;
        for segment in segments {
            match node {
                TokenNode::Group(group) => node = group.nodes.get(segment)?,
                TokenNode::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    pub fn leaf(&self, path: &str) -> Option<&TokenLeaf> {
        match self.get(path)? {
            TokenNode::Leaf(leaf) => Some(leaf),
            TokenNode::Group(_) => None,
        }
    }

    pub fn group(&self, path: &str) -> Option<&TokenTree> {
        match self.get(path)? {
            TokenNode::Group(group) => Some(group),
            TokenNode::Leaf(_) => None,
        }
    }

    pub fn color(&self, path: &str) -> Option<&ColorToken> {
        match self.leaf(path)? {
            TokenLeaf::Color(color) => Some(color),
            _ => None,
        }
    }

    /// All leaves, depth-first in insertion order
    pub fn leaves(&self) -> Vec<LeafEntry<'_>> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.collect_leaves(&mut path, &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, path: &mut Vec<&'a str>, out: &mut Vec<LeafEntry<'a>>) {
        for (key, node) in &self.nodes {
            path.push(key.as_str());
            match node {
                TokenNode::Leaf(leaf) => out.push(LeafEntry {
                    path: path.clone(),
                    leaf,
                }),
                TokenNode::Group(group) => group.collect_leaves(path, out),
            }
            path.pop();
        }
    }

    pub fn from_json_str(src: &str) -> Result<Self, TokenLoadError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn from_toml_str(src: &str) -> Result<Self, TokenLoadError> {
        Ok(toml::from_str(src)?)
    }

    /// Load a tree from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self, TokenLoadError> {
        let content = fs::read_to_string(path).map_err(|source| TokenLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(TokenLoadError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> TokenTree {
        TokenTree::new()
            .with(
                "colors",
                TokenTree::new().with(
                    "action",
                    TokenTree::new()
                        .with("primary", ColorToken::fixed("#0066CC").with_rgb())
                        .with("disabled", ColorToken::new("#CED4DA", "#343A40")),
                ),
            )
            .with(
                "spacing",
                TokenTree::new().with("md", TokenLeaf::responsive("12px", "16px", "16px")),
            )
            .with("animation", TokenTree::new().with("fast", TokenLeaf::scalar("150ms")))
    }

    #[test]
    fn get_walks_dot_paths() {
        let tree = fixture();
        assert!(tree.group("colors.action").is_some());
        assert_eq!(
            tree.color("colors.action.primary").map(|c| c.light.as_str()),
            Some("#0066CC")
        );
        assert!(tree.get("colors.action.primary.light").is_none());
        assert!(tree.get("colors.missing").is_none());
        assert!(tree.color("spacing.md").is_none());
    }

    #[test]
    fn leaves_are_depth_first_in_insertion_order() {
        let tree = fixture();
        let paths: Vec<String> = tree.leaves().iter().map(LeafEntry::dotted).collect();
        assert_eq!(
            paths,
            vec![
                "colors.action.primary",
                "colors.action.disabled",
                "spacing.md",
                "animation.fast",
            ]
        );
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut tree = fixture();
        tree.insert("colors", TokenLeaf::scalar("flat"));
        let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["colors", "spacing", "animation"]);
    }

    #[test]
    fn scalar_numbers_render_without_trailing_zero() {
        assert_eq!(ScalarValue::from(600u16).to_string(), "600");
        assert_eq!(ScalarValue::from(1.5).to_string(), "1.5");
        assert_eq!(ScalarValue::from("0.02em").to_string(), "0.02em");
    }

    #[test]
    fn parses_tagged_json() {
        let src = r##"{
            "colors": {
                "action": {
                    "primary": { "kind": "color", "light": "#0066CC", "dark": "#0066CC", "needsRGB": true }
                }
            },
            "spacing": {
                "md": { "kind": "responsive", "mobile": "12px", "tablet": "16px", "desktop": "16px" }
            },
            "typography": {
                "h1": { "fontWeight": { "kind": "scalar", "value": 700 } }
            }
        }"##;

        let tree = TokenTree::from_json_str(src).unwrap();
        assert!(tree.color("colors.action.primary").unwrap().needs_rgb);
        assert_eq!(
            tree.leaf("spacing.md"),
            Some(&TokenLeaf::responsive("12px", "16px", "16px"))
        );
        assert_eq!(
            tree.leaf("typography.h1.fontWeight"),
            Some(&TokenLeaf::scalar(700u16))
        );
    }

    #[test]
    fn parses_tagged_toml() {
        let src = r##"
[colors.text.primary]
kind = "color"
light = "#1A1D21"
dark = "#F8F9FA"

[animation.duration.fast]
kind = "scalar"
value = "150ms"
"##;

        let tree = TokenTree::from_toml_str(src).unwrap();
        assert_eq!(
            tree.color("colors.text.primary").map(|c| c.dark.as_str()),
            Some("#F8F9FA")
        );
        assert_eq!(
            tree.leaf("animation.duration.fast"),
            Some(&TokenLeaf::scalar("150ms"))
        );
    }

    #[test]
    fn malformed_leaf_reports_path_and_field() {
        let src = r##"{
            "colors": {
                "action": {
                    "primary": { "kind": "color", "light": "#0066CC" }
                }
            }
        }"##;

        let err = TokenTree::from_json_str(src).unwrap_err().to_string();
        assert!(err.contains("colors.action.primary"), "{err}");
        assert!(err.contains("missing field `dark`"), "{err}");

        let err = TokenTree::from_toml_str("[spacing.md]\nkind = \"scalr\"\nvalue = \"4px\"\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("spacing.md"), "{err}");
        assert!(err.contains("scalr"), "{err}");
    }

    #[test]
    fn non_object_nodes_are_rejected() {
        let err = TokenTree::from_json_str(r#"{ "spacing": { "md": "16px" } }"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("spacing.md"), "{err}");
        assert!(err.contains("`kind`"), "{err}");
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.yaml");
        std::fs::write(&path, "colors: {}").unwrap();
        assert!(matches!(
            TokenTree::load(&path),
            Err(TokenLoadError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }
}
