pub mod agenda;
pub mod node_ops;
pub mod progress;
