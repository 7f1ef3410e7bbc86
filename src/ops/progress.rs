use indexmap::IndexMap;
use serde::Serialize;

use crate::model::node::OutlineNode;
use crate::model::path::NodePath;
use crate::parse::keywords::KeywordSet;

/// Completion counts over workflow nodes. Computed on demand from node
/// kinds; never stored on the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Whole percent, rounded down. `None` when there is nothing to count.
    pub fn percent(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        Some((self.done * 100 / self.total) as u8)
    }

    fn count(&mut self, node: &OutlineNode, keywords: &KeywordSet) {
        if let Some(k) = node.keyword() {
            if keywords.is_done(k) {
                self.done += 1;
                self.total += 1;
            } else if keywords.is_todo(k) {
                self.total += 1;
            }
        }
    }
}

/// Progress over the direct children of `node`.
pub fn progress(node: &OutlineNode, keywords: &KeywordSet) -> Progress {
    let mut p = Progress::default();
    for child in &node.children {
        p.count(child, keywords);
    }
    p
}

/// Progress over every descendant of `node`.
pub fn progress_recursive(node: &OutlineNode, keywords: &KeywordSet) -> Progress {
    let mut p = Progress::default();
    for (_, n) in node.walk() {
        p.count(n, keywords);
    }
    p
}

/// Progress for every heading that has at least one workflow node beneath
/// it, keyed by path in document order.
pub fn progress_report(
    root: &OutlineNode,
    keywords: &KeywordSet,
    recursive: bool,
) -> IndexMap<NodePath, Progress> {
    let mut report = IndexMap::new();
    for (path, node) in root.walk() {
        let p = if recursive {
            progress_recursive(node, keywords)
        } else {
            progress(node, keywords)
        };
        if p.total > 0 {
            report.insert(path, p);
        }
    }
    report
}
