use crate::model::config::KeywordConfig;
use crate::model::node::NodeKind;

/// The workflow keywords a parser recognizes, split into open (`todo`) and
/// closed (`done`) states. Order is preserved: the first entry of each list
/// is the target when toggling a node between states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    todo: Vec<String>,
    done: Vec<String>,
}

impl Default for KeywordSet {
    fn default() -> Self {
        KeywordSet::from_config(&KeywordConfig::default())
    }
}

impl KeywordSet {
    /// Build a set from raw lists. Tokens that could never appear as a single
    /// heading word (empty, or containing whitespace) are dropped, as are the
    /// reserved kind tags `ROOT` and `HEADER`.
    pub fn new<I, J, S, T>(todo: I, done: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let clean = |s: String| {
            if !is_keyword_token(&s) {
                tracing::warn!(keyword = %s, "ignoring keyword that is not a single word");
                None
            } else if is_reserved_tag(&s) {
                tracing::warn!(keyword = %s, "ignoring reserved keyword");
                None
            } else {
                Some(s)
            }
        };
        KeywordSet {
            todo: todo.into_iter().map(Into::into).filter_map(clean).collect(),
            done: done.into_iter().map(Into::into).filter_map(clean).collect(),
        }
    }

    pub fn from_config(config: &KeywordConfig) -> Self {
        KeywordSet::new(config.todo.iter().cloned(), config.done.iter().cloned())
    }

    /// Exact, case-sensitive lookup. Returns the stored token.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.todo
            .iter()
            .chain(self.done.iter())
            .find(|k| k.as_str() == token)
            .map(String::as_str)
    }

    pub fn is_todo(&self, keyword: &str) -> bool {
        self.todo.iter().any(|k| k == keyword)
    }

    pub fn is_done(&self, keyword: &str) -> bool {
        self.done.iter().any(|k| k == keyword)
    }

    pub fn todo(&self) -> &[String] {
        &self.todo
    }

    pub fn done(&self) -> &[String] {
        &self.done
    }

    pub fn is_empty(&self) -> bool {
        self.todo.is_empty() && self.done.is_empty()
    }
}

/// `ROOT` and `HEADER` name node kinds in JSON and cannot be keywords.
pub fn is_reserved_tag(s: &str) -> bool {
    s == NodeKind::ROOT_TAG || s == NodeKind::HEADER_TAG
}

/// A keyword must be one non-empty run of non-whitespace characters.
pub fn is_keyword_token(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(char::is_whitespace)
}
