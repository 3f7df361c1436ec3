//! CLI command implementations

pub mod commands;

pub use commands::{analyze, columns};
