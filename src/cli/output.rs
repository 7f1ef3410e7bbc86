use serde::Serialize;

use crate::model::node::OutlineNode;
use crate::model::path::NodePath;
use crate::ops::agenda::{AgendaItem, AgendaWhen};
use crate::ops::progress::Progress;
use crate::util::unicode::fit_to_width;

/// Title column width in agenda listings
const AGENDA_TITLE_WIDTH: usize = 32;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProgressJson {
    pub path: NodePath,
    pub title: String,
    pub done: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<u8>,
}

#[derive(Serialize)]
pub struct ToggleJson {
    pub path: NodePath,
    pub kind: String,
}

pub fn progress_to_json(path: &NodePath, node: &OutlineNode, p: Progress) -> ProgressJson {
    ProgressJson {
        path: path.clone(),
        title: node.title.clone(),
        done: p.done,
        total: p.total,
        percent: p.percent(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One line per heading: path, keyword, title, dates and body size,
/// indented by nesting level.
pub fn format_tree(root: &OutlineNode) -> Vec<String> {
    let mut lines = Vec::new();
    let body_lines = root.body.lines().count();
    if body_lines > 0 {
        lines.push(format!("(preamble, {})", plural(body_lines, "line")));
    }
    for (path, node) in root.walk() {
        let prefix = "  ".repeat(path.depth() - 1);
        lines.push(format!("{}{}", prefix, format_node_line(&path, node)));
    }
    lines
}

/// `1.2 TODO Title [scheduled 2024-01-05 09:00] (+2 lines)`
pub fn format_node_line(path: &NodePath, node: &OutlineNode) -> String {
    let mut line = path.to_string();
    if let Some(k) = node.keyword() {
        line.push(' ');
        line.push_str(k);
    }
    if !node.title.is_empty() {
        line.push(' ');
        line.push_str(&node.title);
    }
    if let Some(ref d) = node.scheduled {
        line.push_str(&format!(" [scheduled {}]", d));
    }
    if let Some(ref d) = node.deadline {
        line.push_str(&format!(" [deadline {}]", d));
    }
    let body_lines = node.body.lines().count();
    if body_lines > 0 {
        line.push_str(&format!(" (+{})", plural(body_lines, "line")));
    }
    line
}

pub fn format_progress_line(path: &NodePath, node: &OutlineNode, p: Progress) -> String {
    let pct = p
        .percent()
        .map(|n| format!("{:>3}%", n))
        .unwrap_or_else(|| "   -".to_string());
    format!("{} {}/{} {} {}", pct, p.done, p.total, path, node.title)
}

/// `2024-01-05 09:00  S  Buy milk                          in 3d`
pub fn format_agenda_line(item: &AgendaItem) -> String {
    let when = match item.when {
        AgendaWhen::Scheduled => 'S',
        AgendaWhen::Deadline => 'D',
    };
    let title = match item.kind.keyword() {
        Some(k) => format!("{} {}", k, item.title),
        None => item.title.clone(),
    };
    format!(
        "{}  {}  {}  {}",
        item.at.format(crate::model::date::DATE_FORMAT),
        when,
        fit_to_width(&title, AGENDA_TITLE_WIDTH),
        item.remaining.label()
    )
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}
