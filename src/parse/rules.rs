use std::sync::LazyLock;

use regex::Regex;

use crate::model::date::{DATE_PATTERN, DirectiveDate};
use crate::parse::keywords::KeywordSet;

/// Heading depth marker
pub const MARKER: char = '*';
pub const SCHEDULED_PREFIX: &str = "SCHEDULED:";
pub const DEADLINE_PREFIX: &str = "DEADLINE:";

static SCHEDULED_RE: LazyLock<Regex> = LazyLock::new(|| directive_regex(SCHEDULED_PREFIX));
static DEADLINE_RE: LazyLock<Regex> = LazyLock::new(|| directive_regex(DEADLINE_PREFIX));

fn directive_regex(prefix: &str) -> Regex {
    Regex::new(&format!(r"^\s*{}\s*<({})>\s*$", regex::escape(prefix), DATE_PATTERN)).unwrap()
}

/// A classified line with its extracted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `SCHEDULED: <...>`
    Schedule(DirectiveDate),
    /// `DEADLINE: <...>`
    Deadline(DirectiveDate),
    /// `** KEYWORD title`
    Heading {
        depth: usize,
        keyword: Option<&'a str>,
        title: &'a str,
    },
    /// Anything else, verbatim
    Body(&'a str),
}

type Classifier = for<'a> fn(&'a str, &'a KeywordSet) -> Option<LineKind<'a>>;

/// One entry of the rule table.
pub struct Rule {
    pub description: &'static str,
    pub classify: Classifier,
}

/// Rules in priority order. The first match wins; the body rule always
/// matches and must stay last.
pub const RULES: &[Rule] = &[
    Rule {
        description: "schedule directive",
        classify: classify_schedule,
    },
    Rule {
        description: "deadline directive",
        classify: classify_deadline,
    },
    Rule {
        description: "heading",
        classify: classify_heading,
    },
    Rule {
        description: "body text",
        classify: classify_body,
    },
];

/// Run the rule table over one line.
pub fn classify<'a>(line: &'a str, keywords: &'a KeywordSet) -> LineKind<'a> {
    RULES
        .iter()
        .find_map(|rule| (rule.classify)(line, keywords))
        .unwrap_or(LineKind::Body(line))
}

fn classify_schedule<'a>(line: &'a str, _: &'a KeywordSet) -> Option<LineKind<'a>> {
    directive_date(&SCHEDULED_RE, line).map(LineKind::Schedule)
}

fn classify_deadline<'a>(line: &'a str, _: &'a KeywordSet) -> Option<LineKind<'a>> {
    directive_date(&DEADLINE_RE, line).map(LineKind::Deadline)
}

fn directive_date(re: &Regex, line: &str) -> Option<DirectiveDate> {
    let caps = re.captures(line)?;
    let raw = caps.get(1)?.as_str();
    Some(DirectiveDate::from_captures(raw, &caps, 2))
}

/// `<markers><whitespace>[KEYWORD][<whitespace>title]`
fn classify_heading<'a>(line: &'a str, keywords: &'a KeywordSet) -> Option<LineKind<'a>> {
    let rest = line.trim_start_matches(MARKER);
    let depth = line.len() - rest.len();
    if depth == 0 {
        return None;
    }
    let content = rest.trim_start();
    if content.len() == rest.len() {
        // `***` alone or `**text`: markers must be followed by whitespace
        return None;
    }

    let (token, after_token) = match content.split_once(char::is_whitespace) {
        Some((token, after)) => (token, after),
        None => (content, ""),
    };
    let (keyword, title) = match keywords.lookup(token) {
        Some(keyword) => (Some(keyword), after_token.trim_start()),
        None => (None, content),
    };

    Some(LineKind::Heading {
        depth,
        keyword,
        title,
    })
}

fn classify_body<'a>(line: &'a str, _: &'a KeywordSet) -> Option<LineKind<'a>> {
    Some(LineKind::Body(line))
}
