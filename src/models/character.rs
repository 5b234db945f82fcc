use serde::{Deserialize, Serialize};

use crate::parsers::deserializers::{deserialize_character_id, deserialize_tags, null_as_default};

/// A character sheet as read from a roster.
///
/// Scalar fields that are missing or `null` in the source come through as empty strings and
/// nested collections come through as empty lists, so callers never need existence checks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    #[serde(deserialize_with = "deserialize_character_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub occupation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub background: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub personality: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub motivations: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationships: Vec<Relationship>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeline_events: Vec<TimelineEvent>,
}

impl CharacterRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub relationship_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// A single entry on a character's narrative timeline.
///
/// `date` is free-form ("1203-04-12", "Year 1203", "Before the war"); see
/// [`crate::timeline::EventDate`] for how it is ordered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_full_record() {
        let json = r#"{
            "id": "c1",
            "name": "Aria Stormwind",
            "occupation": "Knight",
            "location": "Highkeep",
            "background": "Raised by monks",
            "personality": "Stubborn",
            "motivations": "Avenge her brother",
            "relationships": [
                {"targetName": "Bram", "type": "Rival", "description": "Old sparring partner"}
            ],
            "timelineEvents": [
                {"title": "Siege of Highkeep", "date": "1203-04-12", "description": "Held the gate", "tags": ["battle"]}
            ]
        }"#;

        let character: CharacterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(character.id, "c1");
        assert_eq!(character.name, "Aria Stormwind");
        assert_eq!(character.relationships.len(), 1);
        assert_eq!(character.relationships[0].relationship_type, "Rival");
        assert_eq!(character.timeline_events[0].tags, vec!["battle".to_string()]);
    }

    #[test]
    fn test_character_missing_fields_default_to_empty() {
        let json = r#"{"id": "c2"}"#;

        let character: CharacterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(character.name, "");
        assert_eq!(character.background, "");
        assert!(character.relationships.is_empty());
        assert!(character.timeline_events.is_empty());
    }

    #[test]
    fn test_character_null_fields_default_to_empty() {
        let json = r#"{"id": "c3", "name": null, "relationships": null, "timelineEvents": null}"#;

        let character: CharacterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(character.name, "");
        assert!(character.relationships.is_empty());
        assert!(character.timeline_events.is_empty());
    }

    #[test]
    fn test_character_missing_id_rejected() {
        let json = r#"{"name": "Nameless"}"#;
        assert!(serde_json::from_str::<CharacterRecord>(json).is_err());
    }

    #[test]
    fn test_character_new() {
        let character = CharacterRecord::new("c9", "Odo");
        assert_eq!(character.id, "c9");
        assert_eq!(character.name, "Odo");
        assert!(character.occupation.is_empty());
    }
}
