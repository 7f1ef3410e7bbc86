use crate::model::node::{NodeKind, OutlineNode};
use crate::parse::keywords::KeywordSet;
use crate::parse::rules::{LineKind, classify};

/// Parse outline text with the default keyword set (`TODO` / `DONE`).
pub fn parse(text: &str) -> OutlineNode {
    parse_with(text, &KeywordSet::default())
}

/// Parse outline text into a tree rooted at a synthetic `Root` node.
///
/// Never fails: every line is consumed by exactly one rule, and empty input
/// yields an empty root.
pub fn parse_with(text: &str, keywords: &KeywordSet) -> OutlineNode {
    let mut builder = TreeBuilder::new();
    for line in text.lines() {
        builder.feed(classify(line, keywords));
    }
    let root = builder.finish();
    tracing::debug!(
        lines = text.lines().count(),
        nodes = root.descendant_count(),
        "parsed outline"
    );
    root
}

/// Parse raw bytes. Input that is not valid UTF-8 yields an empty root.
pub fn parse_bytes(bytes: &[u8], keywords: &KeywordSet) -> OutlineNode {
    match std::str::from_utf8(bytes) {
        Ok(text) => parse_with(text, keywords),
        Err(e) => {
            tracing::warn!(error = %e, "outline input is not valid UTF-8; returning empty document");
            OutlineNode::root()
        }
    }
}

/// Stack-based tree assembly.
///
/// The stack holds every heading that can still receive children or body
/// text, from the root (bottom) to the deepest open heading (top). A node is
/// moved into its parent's `children` only when it is popped, so the stack
/// owns all open nodes and no back-references are needed.
struct TreeBuilder {
    stack: Vec<OutlineNode>,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder {
            stack: vec![OutlineNode::root()],
        }
    }

    fn feed(&mut self, line: LineKind<'_>) {
        match line {
            LineKind::Schedule(date) => {
                if !date.is_valid() {
                    tracing::warn!(date = %date, "SCHEDULED directive has an invalid date");
                }
                self.current().scheduled = Some(date);
            }
            LineKind::Deadline(date) => {
                if !date.is_valid() {
                    tracing::warn!(date = %date, "DEADLINE directive has an invalid date");
                }
                self.current().deadline = Some(date);
            }
            LineKind::Heading {
                depth,
                keyword,
                title,
            } => {
                let kind = match keyword {
                    Some(k) => NodeKind::Keyword(k.to_string()),
                    None => NodeKind::Header,
                };
                self.open(OutlineNode::new(kind, title, depth));
            }
            LineKind::Body(text) => {
                let body = &mut self.current().body;
                body.push_str(text);
                body.push('\n');
            }
        }
    }

    /// Top of stack. The root is never popped, so the stack is never empty.
    fn current(&mut self) -> &mut OutlineNode {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn current_depth(&self) -> usize {
        self.stack.last().map_or(0, |n| n.depth)
    }

    fn open(&mut self, node: OutlineNode) {
        let depth = node.depth;
        let previous = self.current_depth();
        if depth > previous {
            tracing::trace!(depth, previous, "descend");
        } else if depth == previous {
            tracing::trace!(depth, "sibling");
            self.close_top();
        } else {
            tracing::trace!(depth, previous, "ascend");
            // Close every open heading at this depth or deeper. With
            // contiguous depths this is `stack.len() - depth` pops; skipped
            // levels (e.g. 2 then 4 then 3) still nest correctly.
            while self.stack.len() > 1 && self.current_depth() >= depth {
                self.close_top();
            }
        }
        self.stack.push(node);
    }

    /// Pop the top node and append it to the node beneath it.
    fn close_top(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        if let Some(node) = self.stack.pop() {
            self.current().children.push(node);
        }
    }

    fn finish(mut self) -> OutlineNode {
        while self.stack.len() > 1 {
            self.close_top();
        }
        self.stack.pop().unwrap_or_else(OutlineNode::root)
    }
}
