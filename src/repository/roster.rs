use std::path::{Path, PathBuf};

use super::CharacterRepository;
use crate::models::CharacterRecord;

/// In-memory character repository; insertion order is the natural order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    characters: Vec<CharacterRecord>,
    source: Option<PathBuf>,
}

impl Roster {
    pub fn new(characters: Vec<CharacterRecord>) -> Self {
        Self { characters, source: None }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// File or directory the roster was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn push(&mut self, character: CharacterRecord) {
        self.characters.push(character);
    }

    pub fn as_slice(&self) -> &[CharacterRecord] {
        &self.characters
    }
}

impl From<Vec<CharacterRecord>> for Roster {
    fn from(characters: Vec<CharacterRecord>) -> Self {
        Self::new(characters)
    }
}

impl CharacterRepository for Roster {
    fn count(&self) -> usize {
        self.characters.len()
    }

    fn character_at(&self, index: usize) -> Option<&CharacterRecord> {
        self.characters.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_preserves_insertion_order() {
        let mut roster = Roster::default();
        roster.push(CharacterRecord::new("b", "Bram"));
        roster.push(CharacterRecord::new("a", "Aria"));

        let ids: Vec<&str> = roster.characters().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(roster.len(), 2);
        assert!(!roster.is_empty());
    }

    #[test]
    fn test_roster_source() {
        let roster = Roster::new(vec![]).with_source("/tmp/roster.json");
        assert_eq!(roster.source(), Some(Path::new("/tmp/roster.json")));
        assert!(roster.is_empty());
        assert!(Roster::default().source().is_none());
    }
}
