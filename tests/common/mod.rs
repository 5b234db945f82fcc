//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for roster files and character directories inside a temp dir
pub struct RosterBuilder {
    temp_dir: TempDir,
    characters: Vec<CharacterBuilder>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, characters: Vec::new() }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn with_character(mut self, character: CharacterBuilder) -> Self {
        self.characters.push(character);
        self
    }

    /// Write `roster.json` as a JSON array and return its path
    pub fn write_json(&self) -> PathBuf {
        let values: Vec<Value> = self.characters.iter().map(|c| c.to_value()).collect();
        self.write_raw("roster.json", &serde_json::to_string_pretty(&values).unwrap())
    }

    /// Write `roster.json` wrapped as `{"characters": [...]}`
    pub fn write_wrapped_json(&self) -> PathBuf {
        let values: Vec<Value> = self.characters.iter().map(|c| c.to_value()).collect();
        self.write_raw("roster.json", &json!({ "characters": values }).to_string())
    }

    /// Write `roster.jsonl`, one character per line
    pub fn write_jsonl(&self) -> PathBuf {
        let lines: Vec<String> = self.characters.iter().map(|c| c.to_value().to_string()).collect();
        self.write_raw("roster.jsonl", &lines.join("\n"))
    }

    /// Write one `<id>.json` per character under `characters/` and return the directory
    pub fn write_directory(&self) -> PathBuf {
        let dir = self.temp_dir.path().join("characters");
        fs::create_dir_all(&dir).expect("Failed to create characters dir");
        for character in &self.characters {
            let path = dir.join(format!("{}.json", character.id));
            fs::write(path, character.to_value().to_string()).expect("Failed to write character");
        }
        dir
    }

    /// Write arbitrary content to a file in the temp dir
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Consume the builder, keeping the temp dir alive for the caller
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for RosterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single character sheet in roster JSON form
#[derive(Clone)]
pub struct CharacterBuilder {
    id: String,
    name: String,
    occupation: String,
    location: String,
    background: String,
    personality: String,
    motivations: String,
    relationships: Vec<Value>,
    timeline_events: Vec<Value>,
}

impl CharacterBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            occupation: String::new(),
            location: String::new(),
            background: String::new(),
            personality: String::new(),
            motivations: String::new(),
            relationships: Vec::new(),
            timeline_events: Vec::new(),
        }
    }

    pub fn occupation(mut self, value: &str) -> Self {
        self.occupation = value.to_string();
        self
    }

    pub fn location(mut self, value: &str) -> Self {
        self.location = value.to_string();
        self
    }

    pub fn background(mut self, value: &str) -> Self {
        self.background = value.to_string();
        self
    }

    pub fn personality(mut self, value: &str) -> Self {
        self.personality = value.to_string();
        self
    }

    pub fn motivations(mut self, value: &str) -> Self {
        self.motivations = value.to_string();
        self
    }

    pub fn relationship(mut self, target: &str, kind: &str, description: &str) -> Self {
        self.relationships.push(json!({
            "targetName": target,
            "type": kind,
            "description": description,
        }));
        self
    }

    pub fn event(mut self, title: &str, date: &str, description: &str, tags: &[&str]) -> Self {
        self.timeline_events.push(json!({
            "title": title,
            "date": date,
            "description": description,
            "tags": tags,
        }));
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "occupation": self.occupation,
            "location": self.location,
            "background": self.background,
            "personality": self.personality,
            "motivations": self.motivations,
            "relationships": self.relationships,
            "timelineEvents": self.timeline_events,
        })
    }
}

/// Three-character roster used across integration tests
pub fn sample_roster() -> RosterBuilder {
    RosterBuilder::new()
        .with_character(
            CharacterBuilder::new("c1", "Aria Stormwind")
                .occupation("Knight of the Storm Gate")
                .location("Highkeep")
                .background("Raised by the monks of Saint Brannoc after the flood.")
                .personality("Stubborn, loyal, quick to anger")
                .motivations("Avenge her brother")
                .relationship("Bram Ironhand", "Rival", "Old sparring partner from the squire yard")
                .event("Knighted", "1210", "Knighted by the Duke of Highkeep", &["court", "honour"])
                .event("Born", "1190-03-02", "Born during the great storm", &["storm"]),
        )
        .with_character(
            CharacterBuilder::new("c2", "Bram Ironhand")
                .occupation("Blacksmith")
                .location("Lowmarket")
                .background("Forged the blades of three kings")
                .relationship("Aria Stormwind", "Rival", "Lost the tourney final to her"),
        )
        .with_character(
            CharacterBuilder::new("c3", "Sister Maud")
                .occupation("Herbalist")
                .location("Saint Brannoc Abbey")
                .event("Took vows", "Before the war", "", &["faith"]),
        )
}
