use serde::{Deserialize, Serialize};

/// Configuration from `.orgtree.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineConfig {
    #[serde(default)]
    pub keywords: KeywordConfig,
}

/// Workflow keywords recognized on heading lines.
///
/// `todo` keywords mark open items and `done` keywords closed ones; both
/// lists are matched literally and case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordConfig {
    #[serde(default = "default_todo")]
    pub todo: Vec<String>,
    #[serde(default = "default_done")]
    pub done: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        KeywordConfig {
            todo: default_todo(),
            done: default_done(),
        }
    }
}

fn default_todo() -> Vec<String> {
    vec!["TODO".to_string()]
}

fn default_done() -> Vec<String> {
    vec!["DONE".to_string()]
}
