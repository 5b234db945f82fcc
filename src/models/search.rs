use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Marker emitted where a context snippet was clamped.
pub const ELLIPSIS: &str = "...";

/// Logical section of a character sheet a match belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Overview,
    Biography,
    Relationships,
    Timeline,
}

impl Category {
    /// All categories in field-check order
    pub const ALL: [Category; 4] =
        [Category::Overview, Category::Biography, Category::Relationships, Category::Timeline];

    pub fn label(self) -> &'static str {
        match self {
            Category::Overview => "Overview",
            Category::Biography => "Biography",
            Category::Relationships => "Relationships",
            Category::Timeline => "Timeline",
        }
    }

    /// Index of the character editor tab that shows this category
    pub fn tab_index(self) -> usize {
        match self {
            Category::Overview => 0,
            Category::Biography => 3,
            Category::Relationships => 4,
            Category::Timeline => 5,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow!(
                    "Unknown category: '{}' (valid: overview, biography, relationships, timeline)",
                    s
                )
            })
    }
}

/// Rendered excerpt of a matched field.
///
/// Kept structured so front ends can style the matched text themselves; [`Snippet::to_markup`]
/// produces the inline-span form and [`Snippet::plain`] the undecorated form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub leading_ellipsis: bool,
    pub before: String,
    pub matched: String,
    pub after: String,
    pub trailing_ellipsis: bool,
}

impl Snippet {
    /// Snippet text without highlight markup
    pub fn plain(&self) -> String {
        let mut out = String::with_capacity(
            self.before.len() + self.matched.len() + self.after.len() + 2 * ELLIPSIS.len(),
        );
        if self.leading_ellipsis {
            out.push_str(ELLIPSIS);
        }
        out.push_str(&self.before);
        out.push_str(&self.matched);
        out.push_str(&self.after);
        if self.trailing_ellipsis {
            out.push_str(ELLIPSIS);
        }
        out
    }

    /// Snippet text with the matched portion wrapped in a bold span coloured `accent_hex`
    pub fn to_markup(&self, accent_hex: &str) -> String {
        if self.matched.is_empty() {
            return self.plain();
        }

        let mut out = String::new();
        if self.leading_ellipsis {
            out.push_str(ELLIPSIS);
        }
        out.push_str(&self.before);
        out.push_str(&format!("<b style=\"color:{}\">", accent_hex));
        out.push_str(&self.matched);
        out.push_str("</b>");
        out.push_str(&self.after);
        if self.trailing_ellipsis {
            out.push_str(ELLIPSIS);
        }
        out
    }

    /// Characters of field content shown, ellipses excluded
    pub fn content_chars(&self) -> usize {
        self.before.chars().count() + self.matched.chars().count() + self.after.chars().count()
    }
}

/// One matching field of one character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub character_id: String,
    pub character_name: String,
    pub category: Category,
    pub field: String,
    pub value: String,
    pub snippet: Snippet,
    pub match_text: String,
}

impl SearchMatch {
    pub fn navigation_target(&self) -> NavigationTarget {
        NavigationTarget {
            character_id: self.character_id.clone(),
            category: self.category,
            tab_index: self.category.tab_index(),
        }
    }
}

/// Where the editor should go when a match is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub character_id: String,
    pub category: Category,
    pub tab_index: usize,
}
