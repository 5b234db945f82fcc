//! Command-line surface: `search`, `stats`, `timeline` and `browse`.
pub mod commands;

pub use commands::{Cli, Commands, run};
