use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Address of a node below the root: 1-based child indices joined by dots.
/// `"2.1"` is the first child of the second top-level heading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodePath(Vec<usize>);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathParseError {
    #[error("empty node path")]
    Empty,
    #[error("invalid path segment '{0}': expected a positive number")]
    BadSegment(String),
}

impl NodePath {
    /// Path from 0-based indices.
    pub fn from_indices(indices: Vec<usize>) -> Self {
        NodePath(indices)
    }

    /// 0-based child indices, outermost first.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }
}

impl FromStr for NodePath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PathParseError::Empty);
        }
        s.split('.')
            .map(|seg| match seg.trim().parse::<usize>() {
                Ok(n) if n > 0 => Ok(n - 1),
                _ => Err(PathParseError::BadSegment(seg.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(NodePath)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| (i + 1).to_string()).collect();
        f.write_str(&parts.join("."))
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
