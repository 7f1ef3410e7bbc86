pub mod keywords;
pub mod outline_parser;
pub mod outline_serializer;
pub mod rules;

pub use keywords::KeywordSet;
pub use outline_parser::{parse, parse_bytes, parse_with};
pub use outline_serializer::{serialize, serialize_json};
pub use rules::{LineKind, classify};
