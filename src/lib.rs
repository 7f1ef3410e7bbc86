//! Parse org-style outline text into a tree and write it back.
//!
//! ```
//! let root = orgtree::parse("* TODO Buy milk\nSCHEDULED: <2024-01-05 09:00>\n* DONE Pay rent\n");
//! assert_eq!(root.children.len(), 2);
//! assert_eq!(root.children[0].keyword(), Some("TODO"));
//! assert_eq!(
//!     orgtree::serialize(&root),
//!     "* TODO Buy milk\nSCHEDULED: <2024-01-05 09:00>\n* DONE Pay rent"
//! );
//! ```

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod parse;
pub mod util;

pub use model::{DirectiveDate, NodeKind, NodePath, OutlineNode};
pub use parse::{KeywordSet, parse, parse_bytes, parse_with, serialize, serialize_json};
