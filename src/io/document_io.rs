use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::node::OutlineNode;
use crate::parse::{KeywordSet, parse_bytes, parse_with, serialize};

/// Path argument meaning standard input.
pub const STDIN_PATH: &str = "-";

/// Error type for document I/O
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode JSON outline from {path}: {source}")]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path} is not valid UTF-8; refusing to rewrite it")]
    NotUtf8 { path: PathBuf },
    #[error("cannot write back to standard input")]
    WriteToStdin,
}

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Read raw bytes from a file, or from stdin when the path is `-`.
pub fn read_source(path: &Path) -> Result<Vec<u8>, DocumentError> {
    let read_err = |e: io::Error| DocumentError::ReadError {
        path: path.to_path_buf(),
        source: e,
    };
    if is_stdin(path) {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).map_err(read_err)?;
        Ok(buf)
    } else {
        fs::read(path).map_err(read_err)
    }
}

/// Read and parse an outline document.
pub fn load_document(path: &Path, keywords: &KeywordSet) -> Result<OutlineNode, DocumentError> {
    let bytes = read_source(path)?;
    let root = parse_bytes(&bytes, keywords);
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded document");
    Ok(root)
}

/// Read and parse a document that is about to be written back. Unlike
/// [`load_document`], bytes that are not UTF-8 are an error rather than an
/// empty tree, so saving can never replace the file with nothing.
pub fn load_document_strict(
    path: &Path,
    keywords: &KeywordSet,
) -> Result<OutlineNode, DocumentError> {
    let bytes = read_source(path)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| DocumentError::NotUtf8 {
        path: path.to_path_buf(),
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded document for rewrite");
    Ok(parse_with(text, keywords))
}

/// Read a JSON-encoded tree.
pub fn load_json_document(path: &Path) -> Result<OutlineNode, DocumentError> {
    let bytes = read_source(path)?;
    serde_json::from_slice(&bytes).map_err(|e| DocumentError::JsonError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize a tree and write it to `path` atomically. The file always ends
/// with a single newline unless the document is empty.
pub fn save_document(path: &Path, root: &OutlineNode) -> Result<(), DocumentError> {
    if is_stdin(path) {
        return Err(DocumentError::WriteToStdin);
    }
    let mut text = serialize(root);
    if !text.is_empty() {
        text.push('\n');
    }
    atomic_write(path, text.as_bytes()).map_err(|e| DocumentError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "saved document");
    Ok(())
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
