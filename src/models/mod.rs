//! Data models for the character manager.
//!
//! - [`CharacterRecord`] - A character sheet with its relationships and timeline
//! - [`Relationship`] / [`TimelineEvent`] - Nested collections on a character
//! - [`SearchMatch`] - One matching field produced by the search engine
//! - [`Category`] - Section of a character sheet, used for filtering and navigation
//!
//! Character models use serde with lenient deserializers (see `parsers::deserializers`) so
//! absent values always surface as empty strings or empty lists.

pub mod character;
pub mod search;

pub use character::{CharacterRecord, Relationship, TimelineEvent};
pub use search::{Category, ELLIPSIS, NavigationTarget, SearchMatch, Snippet};
