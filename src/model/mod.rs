pub mod config;
pub mod date;
pub mod node;
pub mod path;

pub use config::*;
pub use date::*;
pub use node::*;
pub use path::*;
