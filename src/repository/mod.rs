//! Read access to character data.
//!
//! The search engine only ever sees a [`CharacterRepository`]: a count plus get-by-index.
//! [`Roster`] is the in-memory implementation, and `Option<R>` stands in for a repository
//! that may be absent (`None` simply has no characters).
//!
//! Loading follows the same graceful degradation as [`crate::parsers`]: unreadable character
//! files in a roster directory are logged and skipped unless more than half of them fail.

pub mod discovery;
pub mod roster;

pub use discovery::{discover_character_files, load_roster};
pub use roster::Roster;

use crate::models::CharacterRecord;

/// Read-only, index-addressed access to characters in the repository's natural order
pub trait CharacterRepository {
    /// Number of character slots
    fn count(&self) -> usize;

    /// Character at `index`, or `None` when the slot is empty or out of range
    fn character_at(&self, index: usize) -> Option<&CharacterRecord>;

    /// Present characters in index order
    fn characters(&self) -> impl Iterator<Item = &CharacterRecord> {
        (0..self.count()).filter_map(move |idx| self.character_at(idx))
    }

    /// Look up a character by exact id, falling back to a case-insensitive name match
    fn find(&self, id_or_name: &str) -> Option<&CharacterRecord> {
        let key = id_or_name.trim();
        self.characters()
            .find(|c| c.id == key)
            .or_else(|| self.characters().find(|c| c.name.eq_ignore_ascii_case(key)))
    }
}

impl CharacterRepository for Vec<CharacterRecord> {
    fn count(&self) -> usize {
        self.len()
    }

    fn character_at(&self, index: usize) -> Option<&CharacterRecord> {
        self.get(index)
    }
}

impl<R: CharacterRepository> CharacterRepository for Option<R> {
    fn count(&self) -> usize {
        self.as_ref().map(|repo| repo.count()).unwrap_or(0)
    }

    fn character_at(&self, index: usize) -> Option<&CharacterRecord> {
        self.as_ref().and_then(|repo| repo.character_at(index))
    }
}

/// Totals shown by the `stats` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryStats {
    pub characters: usize,
    pub relationships: usize,
    pub timeline_events: usize,
    pub tags: usize,
}

impl RepositoryStats {
    pub fn collect<R: CharacterRepository>(repository: &R) -> Self {
        repository.characters().fold(Self::default(), |mut stats, character| {
            stats.characters += 1;
            stats.relationships += character.relationships.len();
            stats.timeline_events += character.timeline_events.len();
            stats.tags += character.timeline_events.iter().map(|e| e.tags.len()).sum::<usize>();
            stats
        })
    }
}
