//! Medieval Character Manager - search and browse a roster of character sheets
//!
//! The heart of the crate is a global search over characters and their nested relationships
//! and timeline events:
//!
//! - Loading rosters from JSON, JSON Lines or a directory of character files
//! - Case-insensitive substring search producing categorised, highlighted matches
//! - Category toggles and a `field:value` filter language over matches
//! - Chronological ordering and filtering of a character's timeline
//! - Explicit colour themes with change subscriptions
//! - A terminal search dialog and a `clap` command line
//!
//! # Example
//!
//! ```no_run
//! use medieval_character_manager::{load_roster, search};
//! use std::path::PathBuf;
//!
//! let roster = load_roster(&PathBuf::from("roster.json"))?;
//! for m in search("storm", &roster) {
//!     println!("{} [{}] {}: {}", m.character_name, m.category, m.field, m.snippet.plain());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod repository;
pub mod search;
pub mod theme;
pub mod timeline;
pub mod tui;
pub mod utils;

pub use models::{Category, CharacterRecord, NavigationTarget, SearchMatch, Snippet};
pub use parsers::roster::parse_roster_file;
pub use repository::{CharacterRepository, Roster, load_roster};
pub use search::{SearchConfig, SearchEngine, search};
pub use theme::{Theme, ThemeStore};
pub use utils::paths::format_path_with_tilde;
