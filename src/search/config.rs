use std::time::Duration;

use crate::utils::env_override;

pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;
pub const DEFAULT_CONTEXT_RADIUS: usize = 50;
pub const DEFAULT_FALLBACK_CHARS: usize = 100;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Tunables for query gating and snippet rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Queries shorter than this (in chars, after trimming) return no results
    pub min_query_chars: usize,
    /// Chars of context kept either side of a match in long fields
    pub context_radius: usize,
    /// Length a long field is cut to when the match cannot be located
    pub fallback_chars: usize,
    /// Idle time after the last keystroke before an interactive search runs.
    /// Only front ends read this; the engine itself never waits.
    pub debounce: Duration,
}

impl SearchConfig {
    /// Defaults overridden by `MCM_MIN_QUERY_CHARS`, `MCM_CONTEXT_RADIUS`,
    /// `MCM_FALLBACK_CHARS` and `MCM_DEBOUNCE_MS`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(min) = env_override::<usize>("MCM_MIN_QUERY_CHARS") {
            config.min_query_chars = min.max(1);
        }
        if let Some(radius) = env_override::<usize>("MCM_CONTEXT_RADIUS") {
            config.context_radius = radius;
        }
        if let Some(fallback) = env_override::<usize>("MCM_FALLBACK_CHARS") {
            config.fallback_chars = fallback;
        }
        if let Some(ms) = env_override::<u64>("MCM_DEBOUNCE_MS") {
            config.debounce = Duration::from_millis(ms);
        }
        config
    }

    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    pub fn with_min_query_chars(mut self, min: usize) -> Self {
        self.min_query_chars = min.max(1);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            context_radius: DEFAULT_CONTEXT_RADIUS,
            fallback_chars: DEFAULT_FALLBACK_CHARS,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}
