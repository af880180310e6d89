//! Minimal mdast (unist) node model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node of a markdown syntax tree in mdast JSON form.
///
/// Only the fields the transform reads are typed. Everything else
/// (`title`, `position`, `data`, `depth`, ...) is kept verbatim in
/// [`extra`](Self::extra) so unrelated nodes serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node type (`root`, `paragraph`, `link`, `html`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Target URL of links, images and definitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Literal value of text, code and html nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Child nodes of parent nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    /// Create a node of the given type with no fields set.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            url: None,
            value: None,
            children: None,
            extra: Map::new(),
        }
    }

    /// Create a parent node.
    #[must_use]
    pub fn parent(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            children: Some(children),
            ..Self::new(kind)
        }
    }

    /// Create a literal node such as `text` or `html`.
    #[must_use]
    pub fn literal(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(kind)
        }
    }

    /// Create a `link` node.
    #[must_use]
    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            url: Some(url.into()),
            children: Some(children),
            ..Self::new("link")
        }
    }

    /// Copy every field except `children`.
    pub(crate) fn clone_without_children(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            url: self.url.clone(),
            value: self.value.clone(),
            children: None,
            extra: self.extra.clone(),
        }
    }
}
