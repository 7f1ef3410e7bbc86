use crate::model::node::{NodeKind, OutlineNode};
use crate::parse::rules::{DEADLINE_PREFIX, MARKER, SCHEDULED_PREFIX};

/// Serialize a tree back to outline text.
///
/// The root contributes its body and children but no heading line. The
/// result is trimmed at both ends of the document only; blank lines inside
/// bodies are kept.
///
/// A heading with neither keyword nor title is written as its markers and a
/// space (`* `). When such a heading is the last line of the document the
/// trim removes that space, and the bare `*` reads back as body text of the
/// previous node. `parse(serialize(t)) == t` does not hold for those trees,
/// although the serialized text is stable from then on.
pub fn serialize(node: &OutlineNode) -> String {
    let mut out = String::new();
    serialize_node(node, &mut out);
    out.trim().to_string()
}

/// Serialize a JSON-encoded tree. Anything that is not a JSON object
/// describing a node serializes to an empty string.
pub fn serialize_json(json: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "input is not JSON; nothing to serialize");
            return String::new();
        }
    };
    if !value.is_object() {
        return String::new();
    }
    match serde_json::from_value::<OutlineNode>(value) {
        Ok(node) => serialize(&node),
        Err(e) => {
            tracing::debug!(error = %e, "JSON object is not an outline node");
            String::new()
        }
    }
}

/// Depth-first emission of one node and its subtree.
fn serialize_node(node: &OutlineNode, out: &mut String) {
    if node.kind != NodeKind::Root {
        out.push_str(&heading_line(node));
        out.push('\n');
    }

    if let Some(ref date) = node.scheduled {
        out.push_str(&format!("{} <{}>\n", SCHEDULED_PREFIX, date));
    }
    if let Some(ref date) = node.deadline {
        out.push_str(&format!("{} <{}>\n", DEADLINE_PREFIX, date));
    }

    out.push_str(&node.body);

    for child in &node.children {
        serialize_node(child, out);
    }
}

/// `*** KEYWORD title`. A heading with neither keyword nor title keeps one
/// space after the markers so it still reads back as a heading.
fn heading_line(node: &OutlineNode) -> String {
    let mut line = MARKER.to_string().repeat(node.depth);
    if let Some(keyword) = node.keyword() {
        line.push(' ');
        line.push_str(keyword);
    }
    if !node.title.is_empty() {
        line.push(' ');
        line.push_str(&node.title);
    }
    if node.keyword().is_none() && node.title.is_empty() {
        line.push(' ');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date::DirectiveDate;
    use crate::parse::parse;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<DirectiveDate> {
        Some(DirectiveDate::Valid(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, 0)
                .unwrap(),
        ))
    }

    #[test]
    fn test_serialize_empty_root() {
        assert_eq!(serialize(&OutlineNode::root()), "");
    }

    #[test]
    fn test_serialize_concrete_scenario() {
        let mut root = OutlineNode::root();
        let mut milk = OutlineNode::new(NodeKind::Keyword("TODO".into()), "Buy milk", 1);
        milk.scheduled = at(2024, 1, 5, 9, 0);
        milk.body = "Remember reusable bags\n".to_string();
        root.children.push(milk);
        root.children
            .push(OutlineNode::new(NodeKind::Keyword("DONE".into()), "Pay rent", 1));

        assert_eq!(
            serialize(&root),
            "* TODO Buy milk\nSCHEDULED: <2024-01-05 09:00>\nRemember reusable bags\n* DONE Pay rent"
        );
    }

    #[test]
    fn test_schedule_before_deadline_before_body() {
        let mut root = OutlineNode::root();
        let mut node = OutlineNode::heading(2, "Report");
        node.deadline = at(2024, 12, 31, 23, 59);
        node.scheduled = at(2024, 12, 1, 0, 0);
        node.body = "draft\n".to_string();
        root.children.push(node);
        assert_eq!(
            serialize(&root),
            "** Report\nSCHEDULED: <2024-12-01 00:00>\nDEADLINE: <2024-12-31 23:59>\ndraft"
        );
    }

    #[test]
    fn test_invalid_date_keeps_raw_text() {
        let mut root = OutlineNode::root();
        let mut node = OutlineNode::heading(1, "x");
        node.deadline = Some(DirectiveDate::Invalid("2024-02-30 10:00".to_string()));
        root.children.push(node);
        assert_eq!(serialize(&root), "* x\nDEADLINE: <2024-02-30 10:00>");
    }

    #[test]
    fn test_bare_heading_does_not_fail() {
        let mut root = OutlineNode::root();
        root.children.push(OutlineNode::heading(1, ""));
        root.children.push(OutlineNode::heading(1, "after"));
        assert_eq!(serialize(&root), "* \n* after");
    }

    #[test]
    fn test_keyword_without_title() {
        let mut root = OutlineNode::root();
        root.children
            .push(OutlineNode::new(NodeKind::Keyword("TODO".into()), "", 3));
        assert_eq!(serialize(&root), "*** TODO");
    }

    #[test]
    fn test_reflects_external_mutation() {
        let mut root = OutlineNode::root();
        root.children
            .push(OutlineNode::new(NodeKind::Keyword("TODO".into()), "task", 1));
        assert_eq!(serialize(&root), "* TODO task");

        root.children[0].kind = NodeKind::Keyword("DONE".into());
        assert_eq!(serialize(&root), "* DONE task");

        root.children[0].kind = NodeKind::Header;
        assert_eq!(serialize(&root), "* task");
    }

    #[test]
    fn test_trailing_empty_heading_loses_its_space() {
        let tree = parse("* a\n* \n");
        assert_eq!(tree.children.len(), 2);
        let once = serialize(&tree);
        assert_eq!(once, "* a\n*");

        let reparsed = parse(&once);
        assert_eq!(reparsed.children.len(), 1);
        assert_eq!(reparsed.children[0].body, "*\n");
        assert_eq!(serialize(&reparsed), once);

        // Anywhere else the space survives and the heading reads back.
        let tree = parse("* \n* a\n");
        assert_eq!(parse(&serialize(&tree)), tree);
    }

    #[test]
    fn test_only_document_edges_are_trimmed() {
        let mut root = OutlineNode::root();
        root.body = "\n\n".to_string();
        let mut a = OutlineNode::heading(1, "a");
        a.body = "x\n\n\ny\n\n".to_string();
        root.children.push(a);
        assert_eq!(serialize(&root), "* a\nx\n\n\ny");
    }

    #[test]
    fn test_serialize_json_permissive() {
        assert_eq!(serialize_json(""), "");
        assert_eq!(serialize_json("42"), "");
        assert_eq!(serialize_json("[1, 2]"), "");
        assert_eq!(serialize_json("\"* a\""), "");
        assert_eq!(serialize_json("{\"children\": 3}"), "");
        assert_eq!(serialize_json("{}"), "");
    }

    #[test]
    fn test_serialize_json_tree() {
        let json = r#"{
            "kind": "ROOT",
            "children": [
                {"kind": "TODO", "title": "Buy milk", "depth": 1,
                 "scheduled": "2024-01-05 09:00",
                 "body": "Remember reusable bags\n",
                 "children": [{"title": "sub", "depth": 2}]},
                {"kind": "HEADER", "title": "Notes", "depth": 1}
            ]
        }"#;
        assert_eq!(
            serialize_json(json),
            "* TODO Buy milk\nSCHEDULED: <2024-01-05 09:00>\nRemember reusable bags\n** sub\n* Notes"
        );
    }
}
