use crate::model::node::{NodeKind, OutlineNode};
use crate::model::path::NodePath;
use crate::parse::keywords::KeywordSet;

/// Error type for node operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NodeOpError {
    #[error("node not found: {0}")]
    NotFound(NodePath),
    #[error("node {0} has no workflow keyword")]
    NotWorkflow(NodePath),
    #[error("no {0} keyword configured")]
    NoKeyword(&'static str),
    #[error("unknown keyword: {0}")]
    UnknownKeyword(String),
}

// ---------------------------------------------------------------------------
// Workflow state
// ---------------------------------------------------------------------------

/// Flip a node between open and closed: a todo keyword becomes the first
/// done keyword, a done keyword becomes the first todo keyword.
/// Returns the new kind.
pub fn toggle_state(
    root: &mut OutlineNode,
    path: &NodePath,
    keywords: &KeywordSet,
) -> Result<NodeKind, NodeOpError> {
    let node = root
        .get_mut(path)
        .ok_or_else(|| NodeOpError::NotFound(path.clone()))?;

    let next = match node.keyword() {
        Some(k) if keywords.is_todo(k) => keywords
            .done()
            .first()
            .ok_or(NodeOpError::NoKeyword("done"))?,
        Some(k) if keywords.is_done(k) => keywords
            .todo()
            .first()
            .ok_or(NodeOpError::NoKeyword("todo"))?,
        _ => return Err(NodeOpError::NotWorkflow(path.clone())),
    };

    node.kind = NodeKind::Keyword(next.clone());
    tracing::debug!(%path, kind = %node.kind, "toggled workflow state");
    Ok(node.kind.clone())
}

/// Set a node's keyword, or clear it with `None`. The keyword must be one
/// of the configured set so that the node reads back the same way.
pub fn set_keyword(
    root: &mut OutlineNode,
    path: &NodePath,
    keyword: Option<&str>,
    keywords: &KeywordSet,
) -> Result<(), NodeOpError> {
    let kind = match keyword {
        Some(k) => match keywords.lookup(k) {
            Some(known) => NodeKind::Keyword(known.to_string()),
            None => return Err(NodeOpError::UnknownKeyword(k.to_string())),
        },
        None => NodeKind::Header,
    };
    let node = root
        .get_mut(path)
        .ok_or_else(|| NodeOpError::NotFound(path.clone()))?;
    node.kind = kind;
    Ok(())
}
