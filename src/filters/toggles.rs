use crate::models::{Category, SearchMatch};

/// Per-category visibility switches over an already ordered result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryToggles {
    enabled: [bool; 4],
}

impl Default for CategoryToggles {
    fn default() -> Self {
        Self { enabled: [true; 4] }
    }
}

impl CategoryToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the given categories enabled
    pub fn only(categories: &[Category]) -> Self {
        let mut toggles = Self { enabled: [false; 4] };
        for &category in categories {
            toggles.set(category, true);
        }
        toggles
    }

    pub fn toggle(&mut self, category: Category) {
        let slot = &mut self.enabled[slot(category)];
        *slot = !*slot;
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        self.enabled[slot(category)] = enabled;
    }

    pub fn allows(&self, category: Category) -> bool {
        self.enabled[slot(category)]
    }

    pub fn all_enabled(&self) -> bool {
        self.enabled.iter().all(|&on| on)
    }

    /// Matches whose category is enabled, in their original order
    pub fn apply<'a>(&self, matches: &'a [SearchMatch]) -> Vec<&'a SearchMatch> {
        matches.iter().filter(|m| self.allows(m.category)).collect()
    }
}

fn slot(category: Category) -> usize {
    match category {
        Category::Overview => 0,
        Category::Biography => 1,
        Category::Relationships => 2,
        Category::Timeline => 3,
    }
}
