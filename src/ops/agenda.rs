use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::node::{NodeKind, OutlineNode};
use crate::model::path::NodePath;

/// Which directive put an item on the agenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgendaWhen {
    Scheduled,
    Deadline,
}

/// Time left until an agenda date. Negative values mean the date has passed.
/// Each unit is the whole count of that unit, truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Remaining {
    pub fn between(now: NaiveDateTime, at: NaiveDateTime) -> Self {
        let delta = at - now;
        Remaining {
            days: delta.num_days(),
            hours: delta.num_hours(),
            minutes: delta.num_minutes(),
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.minutes < 0
    }

    /// Short human form: `in 3d`, `in 5h`, `in 12m`, `2d ago`, `now`.
    pub fn label(&self) -> String {
        let (value, unit) = if self.days != 0 {
            (self.days, "d")
        } else if self.hours != 0 {
            (self.hours, "h")
        } else if self.minutes != 0 {
            (self.minutes, "m")
        } else {
            return "now".to_string();
        };
        if value < 0 {
            format!("{}{} ago", -value, unit)
        } else {
            format!("in {}{}", value, unit)
        }
    }
}

/// One dated node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaItem {
    pub path: NodePath,
    pub title: String,
    pub kind: NodeKind,
    pub when: AgendaWhen,
    pub at: NaiveDateTime,
    pub remaining: Remaining,
}

/// Every valid schedule and deadline in the tree, sorted by date. Nodes with
/// both produce two items. Invalid dates are skipped.
pub fn agenda(root: &OutlineNode, now: NaiveDateTime) -> Vec<AgendaItem> {
    let mut items = Vec::new();
    let mut push = |path: &NodePath, node: &OutlineNode, when, at: NaiveDateTime| {
        items.push(AgendaItem {
            path: path.clone(),
            title: node.title.clone(),
            kind: node.kind.clone(),
            when,
            at,
            remaining: Remaining::between(now, at),
        });
    };

    for (path, node) in root.walk() {
        if let Some(at) = node.scheduled.as_ref().and_then(|d| d.datetime()) {
            push(&path, node, AgendaWhen::Scheduled, at);
        }
        if let Some(at) = node.deadline.as_ref().and_then(|d| d.datetime()) {
            push(&path, node, AgendaWhen::Deadline, at);
        }
    }

    // Stable: same instant keeps document order
    items.sort_by_key(|item| item.at);
    items
}
