use std::sync::Arc;

use tracing::debug;

use super::config::SearchConfig;
use super::query::SearchQuery;
use super::snippet::{SnippetPolicy, render};
use crate::models::{Category, CharacterRecord, SearchMatch};
use crate::repository::CharacterRepository;
use crate::theme::Theme;

pub const FIELD_NAME: &str = "Name";
pub const FIELD_OCCUPATION: &str = "Occupation";
pub const FIELD_LOCATION: &str = "Location";
pub const FIELD_BACKGROUND: &str = "Background";
pub const FIELD_PERSONALITY: &str = "Personality";
pub const FIELD_MOTIVATIONS: &str = "Motivations";
pub const FIELD_TAG: &str = "Tag";

// Labels used when the value that normally names a nested field is blank
const UNNAMED_RELATIONSHIP: &str = "Relationship";
const UNNAMED_EVENT: &str = "Event";

/// Substring search across every character in a repository.
///
/// Stateless apart from its configuration: each call re-reads the repository and returns
/// matches in repository order, then field-check order (Name, Occupation, Location,
/// Background, Personality, Motivations, relationships, timeline events, tags).
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: SearchConfig,
    theme: Arc<Theme>,
}

impl SearchEngine {
    pub fn new(config: SearchConfig, theme: Arc<Theme>) -> Self {
        Self { config, theme }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    /// Highlight colour for subsequent searches
    pub fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
    }

    pub fn parse_query(&self, raw: &str) -> Option<SearchQuery> {
        SearchQuery::parse(raw, self.config.min_query_chars)
    }

    /// All matches for `raw_query`. Queries under the minimum length return nothing
    /// without touching the repository.
    pub fn search<R: CharacterRepository>(
        &self,
        raw_query: &str,
        repository: &R,
    ) -> Vec<SearchMatch> {
        let Some(query) = self.parse_query(raw_query) else {
            return Vec::new();
        };

        let accent = self.theme.accent.to_hex();
        let mut matches = Vec::new();
        let mut scanned = 0;

        for character in repository.characters() {
            scanned += 1;
            let mut collector = MatchCollector {
                query: &query,
                config: &self.config,
                accent: &accent,
                character,
                out: &mut matches,
            };
            collector.scan();
        }

        debug!(query = query.term(), scanned, matches = matches.len(), "search complete");
        matches
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default(), Arc::new(Theme::default()))
    }
}

/// Search `repository` with the default configuration and theme
pub fn search<R: CharacterRepository>(query: &str, repository: &R) -> Vec<SearchMatch> {
    SearchEngine::default().search(query, repository)
}

/// Per-character scan state
struct MatchCollector<'a> {
    query: &'a SearchQuery,
    config: &'a SearchConfig,
    accent: &'a str,
    character: &'a CharacterRecord,
    out: &'a mut Vec<SearchMatch>,
}

impl MatchCollector<'_> {
    fn scan(&mut self) {
        let c = self.character;

        self.check(Category::Overview, FIELD_NAME, &c.name, SnippetPolicy::Highlight);
        self.check(Category::Overview, FIELD_OCCUPATION, &c.occupation, SnippetPolicy::Highlight);
        self.check(Category::Overview, FIELD_LOCATION, &c.location, SnippetPolicy::Highlight);

        self.check(Category::Biography, FIELD_BACKGROUND, &c.background, SnippetPolicy::Context);
        self.check(Category::Biography, FIELD_PERSONALITY, &c.personality, SnippetPolicy::Context);
        self.check(Category::Biography, FIELD_MOTIVATIONS, &c.motivations, SnippetPolicy::Context);

        for relationship in &c.relationships {
            let kind = label_or(&relationship.relationship_type, UNNAMED_RELATIONSHIP);
            let target = label_or(&relationship.target_name, UNNAMED_RELATIONSHIP);
            self.check(
                Category::Relationships,
                kind,
                &relationship.target_name,
                SnippetPolicy::Highlight,
            );
            self.check(
                Category::Relationships,
                target,
                &relationship.description,
                SnippetPolicy::Context,
            );
        }

        for event in &c.timeline_events {
            let date = label_or(&event.date, UNNAMED_EVENT);
            let title = label_or(&event.title, UNNAMED_EVENT);
            self.check(Category::Timeline, date, &event.title, SnippetPolicy::Highlight);
            self.check(Category::Timeline, title, &event.description, SnippetPolicy::Context);
            for tag in &event.tags {
                self.check(Category::Timeline, FIELD_TAG, tag, SnippetPolicy::Highlight);
            }
        }
    }

    fn check(&mut self, category: Category, field: &str, value: &str, policy: SnippetPolicy) {
        let Some(found) = self.query.locate(value) else {
            return;
        };

        let snippet = render(
            policy,
            value,
            Some(found),
            self.config.context_radius,
            self.config.fallback_chars,
        );
        let match_text = snippet.to_markup(self.accent);

        self.out.push(SearchMatch {
            character_id: self.character.id.clone(),
            character_name: self.character.name.clone(),
            category,
            field: field.to_string(),
            value: value.to_string(),
            snippet,
            match_text,
        });
    }
}

fn label_or<'a>(label: &'a str, fallback: &'a str) -> &'a str {
    if label.trim().is_empty() { fallback } else { label }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Relationship, TimelineEvent};

    fn aria() -> CharacterRecord {
        CharacterRecord::new("c1", "Aria Stormwind")
    }

    fn fields(matches: &[SearchMatch]) -> Vec<(Category, &str)> {
        matches.iter().map(|m| (m.category, m.field.as_str())).collect()
    }

    #[test]
    fn test_search_name_match() {
        let repo = vec![aria()];
        let matches = search("storm", &repo);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].character_id, "c1");
        assert_eq!(matches[0].category, Category::Overview);
        assert_eq!(matches[0].field, FIELD_NAME);
        assert_eq!(matches[0].value, "Aria Stormwind");
        assert_eq!(matches[0].snippet.matched, "Storm");
        assert_eq!(matches[0].match_text, "Aria <b style=\"color:#c9a227\">Storm</b>wind");
    }

    #[test]
    fn test_search_short_query_returns_nothing() {
        let repo = vec![aria()];
        assert!(search("s", &repo).is_empty());
        assert!(search("  ", &repo).is_empty());
        assert_eq!(search("st", &repo).len(), 1);
    }

    #[test]
    fn test_search_field_order_within_character() {
        let mut c = aria();
        c.occupation = "Storm caller".to_string();
        c.location = "Stormhold".to_string();
        c.background = "Born in a storm".to_string();
        c.personality = "Stormy".to_string();
        c.motivations = "Calm the storm".to_string();
        c.relationships.push(Relationship {
            target_name: "Storm Hawk".to_string(),
            relationship_type: "Familiar".to_string(),
            description: "Found after a storm".to_string(),
        });
        c.timeline_events.push(TimelineEvent {
            title: "The Great Storm".to_string(),
            date: "1203".to_string(),
            description: "A storm flattened the keep".to_string(),
            tags: vec!["storm".to_string(), "loss".to_string()],
        });

        let matches = search("storm", &vec![c]);
        assert_eq!(
            fields(&matches),
            vec![
                (Category::Overview, "Name"),
                (Category::Overview, "Occupation"),
                (Category::Overview, "Location"),
                (Category::Biography, "Background"),
                (Category::Biography, "Personality"),
                (Category::Biography, "Motivations"),
                (Category::Relationships, "Familiar"),
                (Category::Relationships, "Storm Hawk"),
                (Category::Timeline, "1203"),
                (Category::Timeline, "The Great Storm"),
                (Category::Timeline, "Tag"),
            ]
        );
    }

    #[test]
    fn test_search_character_order_outer() {
        let mut bram = CharacterRecord::new("c2", "Bram");
        bram.background = "Squire to Aria".to_string();
        let repo = vec![bram, CharacterRecord::new("c1", "Aria")];

        let matches = search("aria", &repo);
        let ids: Vec<&str> = matches.iter().map(|m| m.character_id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c1"]);
    }

    #[test]
    fn test_relationship_blank_labels_fall_back() {
        let mut c = aria();
        c.relationships.push(Relationship {
            target_name: String::new(),
            relationship_type: String::new(),
            description: "An oath sworn in blood".to_string(),
        });

        let matches = search("oath", &vec![c]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].field, UNNAMED_RELATIONSHIP);
    }

    #[test]
    fn test_engine_uses_theme_accent() {
        let engine = SearchEngine::new(SearchConfig::default(), Arc::new(Theme::night()));
        let matches = engine.search("aria", &vec![aria()]);
        assert!(matches[0].match_text.contains("color:#5eb3f6"));
    }

    #[test]
    fn test_engine_respects_configured_minimum() {
        let engine = SearchEngine::new(
            SearchConfig::default().with_min_query_chars(4),
            Arc::new(Theme::default()),
        );
        assert!(engine.search("ari", &vec![aria()]).is_empty());
        assert_eq!(engine.search("aria", &vec![aria()]).len(), 1);
    }

    #[test]
    fn test_search_case_folding_names() {
        let repo = vec![
            CharacterRecord::new("c1", "Κύριλλος της ΟΔΟΣ"),
            CharacterRecord::new("c2", "Mehmed of İstanbul"),
        ];

        let greek = search("ΟΔΟΣ", &repo);
        assert_eq!(greek.len(), 1);
        assert_eq!(greek[0].snippet.matched, "ΟΔΟΣ");

        let turkish = search("İstanbul", &repo);
        assert_eq!(turkish.len(), 1);
        assert_eq!(turkish[0].snippet.before, "Mehmed of ");
        assert_eq!(turkish[0].snippet.matched, "İstanbul");
    }

    #[test]
    fn test_absent_repository_yields_nothing() {
        let repo: Option<Vec<CharacterRecord>> = None;
        assert!(search("storm", &repo).is_empty());
    }
}
