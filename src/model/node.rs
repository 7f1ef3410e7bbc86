use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::date::DirectiveDate;
use crate::model::path::NodePath;

/// What a node is: the synthetic root, a plain heading, or a heading carrying
/// one of the configured workflow keywords (`TODO`, `DONE`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Root,
    #[default]
    Header,
    Keyword(String),
}

impl NodeKind {
    /// Tag used in JSON for the root.
    pub const ROOT_TAG: &'static str = "ROOT";
    /// Tag used in JSON for a heading with no keyword.
    pub const HEADER_TAG: &'static str = "HEADER";

    /// The keyword token, if this kind has one.
    pub fn keyword(&self) -> Option<&str> {
        match self {
            NodeKind::Keyword(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Root => Self::ROOT_TAG,
            NodeKind::Header => Self::HEADER_TAG,
            NodeKind::Keyword(k) => k,
        }
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::ROOT_TAG => NodeKind::Root,
            Self::HEADER_TAG | "" => NodeKind::Header,
            _ => NodeKind::Keyword(s),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an outline document.
///
/// A parsed document is always a single `Root` node at depth 0 whose
/// children are the top-level headings. Nodes are plain values: the tree can
/// be edited freely and re-serialized, nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutlineNode {
    #[serde(default)]
    pub kind: NodeKind,
    /// Heading text after the markers and keyword
    #[serde(default)]
    pub title: String,
    /// Number of `*` markers (0 = root)
    #[serde(default)]
    pub depth: usize,
    /// Body text up to the next heading, each line newline-terminated
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<DirectiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DirectiveDate>,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// An empty document root.
    pub fn root() -> Self {
        OutlineNode {
            kind: NodeKind::Root,
            ..Default::default()
        }
    }

    pub fn new(kind: NodeKind, title: impl Into<String>, depth: usize) -> Self {
        OutlineNode {
            kind,
            title: title.into(),
            depth,
            ..Default::default()
        }
    }

    /// A plain heading with no keyword.
    pub fn heading(depth: usize, title: impl Into<String>) -> Self {
        Self::new(NodeKind::Header, title, depth)
    }

    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }

    pub fn keyword(&self) -> Option<&str> {
        self.kind.keyword()
    }

    /// True when the node has no children, body, title or dates.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
            && self.body.is_empty()
            && self.title.is_empty()
            && self.scheduled.is_none()
            && self.deadline.is_none()
    }

    /// Resolve a path relative to this node.
    pub fn get(&self, path: &NodePath) -> Option<&OutlineNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &i| node.children.get(i))
    }

    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut OutlineNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &i| node.children.get_mut(i))
    }

    /// All descendants in document order, each with its path.
    pub fn walk(&self) -> Vec<(NodePath, &OutlineNode)> {
        let mut out = Vec::new();
        walk_into(self, &NodePath::default(), &mut out);
        out
    }

    /// Number of descendants (not counting this node).
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

fn walk_into<'a>(node: &'a OutlineNode, path: &NodePath, out: &mut Vec<(NodePath, &'a OutlineNode)>) {
    for (i, child) in node.children.iter().enumerate() {
        let child_path = path.child(i);
        out.push((child_path.clone(), child));
        walk_into(child, &child_path, out);
    }
}
