//! Colour themes.
//!
//! A [`Theme`] is an immutable value handed explicitly to whatever draws or highlights text.
//! The [`ThemeStore`] owns the current selection and tells subscribed observers when it
//! changes; nothing looks a theme up from global state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form used in highlight markup
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    /// Highlight colour for matched text
    pub accent: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub selection: Rgb,
    pub background: Rgb,
    pub error: Rgb,
}

impl Theme {
    /// Warm light theme, the default
    pub fn parchment() -> Self {
        Self {
            name: "parchment".to_string(),
            accent: Rgb(201, 162, 39),
            text: Rgb(250, 244, 227),
            muted: Rgb(150, 136, 110),
            selection: Rgb(122, 31, 43),
            background: Rgb(38, 30, 22),
            error: Rgb(220, 68, 58),
        }
    }

    pub fn night() -> Self {
        Self {
            name: "night".to_string(),
            accent: Rgb(94, 179, 246),
            text: Rgb(226, 232, 240),
            muted: Rgb(113, 113, 122),
            selection: Rgb(30, 64, 120),
            background: Rgb(15, 17, 26),
            error: Rgb(239, 68, 68),
        }
    }

    pub fn presets() -> Vec<Theme> {
        vec![Self::parchment(), Self::night()]
    }

    pub fn by_name(name: &str) -> Option<Theme> {
        Self::presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::parchment()
    }
}

/// Receives theme changes from a [`ThemeStore`]
pub trait ThemeObserver {
    fn theme_changed(&mut self, theme: &Arc<Theme>);
}

impl<F> ThemeObserver for F
where
    F: FnMut(&Arc<Theme>),
{
    fn theme_changed(&mut self, theme: &Arc<Theme>) {
        self(theme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Current theme plus the observers interested in changes to it
pub struct ThemeStore {
    current: Arc<Theme>,
    observers: Vec<(SubscriptionId, Box<dyn ThemeObserver>)>,
    next_id: u64,
}

impl ThemeStore {
    pub fn new(theme: Theme) -> Self {
        Self { current: Arc::new(theme), observers: Vec::new(), next_id: 0 }
    }

    pub fn current(&self) -> Arc<Theme> {
        Arc::clone(&self.current)
    }

    pub fn subscribe(&mut self, observer: impl ThemeObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Replace the current theme and notify every observer once
    pub fn set_theme(&mut self, theme: Theme) {
        debug!("Switching theme to {}", theme.name);
        self.current = Arc::new(theme);
        for (_, observer) in &mut self.observers {
            observer.theme_changed(&self.current);
        }
    }

    /// Advance to the next preset after the current theme
    pub fn cycle(&mut self) {
        let presets = Theme::presets();
        let next = presets
            .iter()
            .position(|t| t.name == self.current.name)
            .map(|idx| (idx + 1) % presets.len())
            .unwrap_or(0);
        self.set_theme(presets[next].clone());
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("current", &self.current.name)
            .field("observers", &self.observers.len())
            .finish()
    }
}
