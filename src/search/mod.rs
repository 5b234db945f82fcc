//! Global search across character sheets.
//!
//! [`search`] (or [`SearchEngine::search`] for a non-default configuration) scans every
//! character of a [`crate::repository::CharacterRepository`] for a case-insensitive
//! substring and returns one [`crate::models::SearchMatch`] per matching field.
//!
//! The engine is synchronous and keeps no state between calls; debouncing, cancellation and
//! category filtering are left to the caller.
//!
//! # Example
//!
//! ```
//! use medieval_character_manager::models::{Category, CharacterRecord};
//! use medieval_character_manager::repository::Roster;
//! use medieval_character_manager::search::search;
//!
//! let roster = Roster::new(vec![CharacterRecord::new("c1", "Aria Stormwind")]);
//! let matches = search("storm", &roster);
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].category, Category::Overview);
//! assert_eq!(matches[0].snippet.matched, "Storm");
//! ```

pub mod config;
pub mod engine;
pub mod query;
pub mod snippet;

pub use config::SearchConfig;
pub use engine::{SearchEngine, search};
pub use query::SearchQuery;
pub use snippet::SnippetPolicy;
