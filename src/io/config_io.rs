use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::OutlineConfig;
use crate::parse::keywords::{KeywordSet, is_keyword_token, is_reserved_tag};

/// File name looked up in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".orgtree.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid keyword '{0}': keywords must be a single word")]
    InvalidKeyword(String),
    #[error("keyword '{0}' is reserved")]
    ReservedKeyword(String),
    #[error("keyword '{0}' is listed more than once")]
    DuplicateKeyword(String),
}

/// Walk up from `start` looking for `.orgtree.toml`.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read and validate a config file.
pub fn read_config(path: &Path) -> Result<OutlineConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: OutlineConfig = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Resolve the effective config: an explicit path wins, then discovery from
/// `cwd`, then built-in defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<OutlineConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    match discover_config(cwd) {
        Some(path) => read_config(&path),
        None => {
            tracing::debug!("no {} found; using default keywords", CONFIG_FILE_NAME);
            Ok(OutlineConfig::default())
        }
    }
}

/// Load the config and build the keyword set the parser uses.
pub fn load_keywords(explicit: Option<&Path>, cwd: &Path) -> Result<KeywordSet, ConfigError> {
    let config = load_config(explicit, cwd)?;
    Ok(KeywordSet::from_config(&config.keywords))
}

/// Reject keywords that would not read back as themselves.
pub fn validate(config: &OutlineConfig) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for keyword in config.keywords.todo.iter().chain(config.keywords.done.iter()) {
        if !is_keyword_token(keyword) {
            return Err(ConfigError::InvalidKeyword(keyword.clone()));
        }
        if is_reserved_tag(keyword) {
            return Err(ConfigError::ReservedKeyword(keyword.clone()));
        }
        if !seen.insert(keyword.as_str()) {
            return Err(ConfigError::DuplicateKeyword(keyword.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_discover_walks_up() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        let path = write_config(tmp.path(), "[keywords]\ntodo = [\"NEXT\"]\n");

        assert_eq!(discover_config(&nested), Some(path));
        let keywords = load_keywords(None, &nested).unwrap();
        assert!(keywords.is_todo("NEXT"));
        assert!(!keywords.is_todo("TODO"));
        assert!(keywords.is_done("DONE"));
    }

    #[test]
    fn test_defaults_when_missing() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config, OutlineConfig::default());
    }

    #[test]
    fn test_explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path(), "[keywords]\ntodo = [\"A\"]\n");
        let other = tmp.path().join("other.toml");
        fs::write(&other, "[keywords]\ntodo = [\"B\"]\n").unwrap();

        let config = load_config(Some(&other), tmp.path()).unwrap();
        assert_eq!(config.keywords.todo, vec!["B"]);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml")), tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "[keywords\n");
        assert!(matches!(read_config(&path), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_validation() {
        let tmp = TempDir::new().unwrap();

        let path = write_config(tmp.path(), "[keywords]\ntodo = [\"IN PROGRESS\"]\n");
        assert!(matches!(read_config(&path), Err(ConfigError::InvalidKeyword(k)) if k == "IN PROGRESS"));

        let path = write_config(tmp.path(), "[keywords]\ndone = [\"HEADER\"]\n");
        assert!(matches!(read_config(&path), Err(ConfigError::ReservedKeyword(_))));

        let path = write_config(tmp.path(), "[keywords]\ntodo = [\"X\"]\ndone = [\"X\"]\n");
        assert!(matches!(read_config(&path), Err(ConfigError::DuplicateKeyword(k)) if k == "X"));
    }
}
