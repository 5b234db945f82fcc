//! Search dialog state and event handling.
//!
//! The `App` struct owns the dialog state and runs the event loop via `run()`:
//!
//! - **Debounced search**: each keystroke restarts the idle timer; the engine runs once the
//!   query has been idle for [`SearchConfig::debounce`], or at once on Enter
//! - **Category toggles**: F1–F4 hide or show whole categories without re-running the search
//! - **Filter language**: input of the form `filter_expr | query` narrows results with
//!   [`parse_filter`]; the filter is (re)applied when Enter is pressed and dropped as soon as
//!   the prefix is removed. The input only splits when the text before the first `|` is blank
//!   or holds a `field:value` term, so a plain query may contain `|`
//! - **Theme observer**: the app subscribes to the [`ThemeStore`] and re-highlights when the
//!   theme changes
//! - **Navigation**: Tab closes the dialog and hands back the selected match's
//!   [`NavigationTarget`]
//!
//! [`SearchConfig::debounce`]: crate::search::SearchConfig

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::debug;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::{ClipboardProvider, OnDemandClipboard, copy_match_value};
use crate::filters::{CategoryToggles, FilterExpr, apply_filters, parse_filter};
use crate::models::{NavigationTarget, SearchMatch};
use crate::repository::CharacterRepository;
use crate::search::SearchEngine;
use crate::theme::{SubscriptionId, Theme, ThemeStore};

const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
const STATUS_ERROR_DURATION_MS: u64 = 5000;
const MAX_QUERY_CHARS: usize = 256;
const PAGE_SIZE: isize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

pub struct App<R: CharacterRepository> {
    repository: R,
    engine: SearchEngine,
    theme_store: ThemeStore,
    theme_subscription: SubscriptionId,
    theme_changed: Rc<Cell<bool>>,
    clipboard: Box<dyn ClipboardProvider>,

    input: String,
    results: Vec<SearchMatch>,
    toggles: CategoryToggles,
    current_filter: Option<FilterExpr>,
    filter_error: Option<String>,
    selected_idx: usize,
    /// Time of the last edit not yet searched
    pending_since: Option<Instant>,

    status_message: Option<StatusMessage>,
    should_quit: bool,
    outcome: Option<NavigationTarget>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<R: CharacterRepository> App<R> {
    pub fn new(repository: R, mut engine: SearchEngine, mut theme_store: ThemeStore) -> Self {
        let theme_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&theme_changed);
        let theme_subscription = theme_store.subscribe(move |_: &Arc<Theme>| flag.set(true));
        engine.set_theme(theme_store.current());

        Self {
            repository,
            engine,
            theme_store,
            theme_subscription,
            theme_changed,
            clipboard: Box::new(OnDemandClipboard),
            input: String::new(),
            results: Vec::new(),
            toggles: CategoryToggles::default(),
            current_filter: None,
            filter_error: None,
            selected_idx: 0,
            pending_since: None,
            status_message: None,
            should_quit: false,
            outcome: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardProvider>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Run until the user quits or opens a match; returns the opened match's target
    pub fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<Option<NavigationTarget>> {
        while !self.should_quit {
            let now = Instant::now();
            self.clear_expired_status(now);
            self.tick(now);

            // Periodic redraw also picks up terminal resizes
            let stale = now.duration_since(self.last_draw_time) >= Duration::from_millis(100);
            if self.needs_redraw || stale {
                let visible = self.visible_matches();
                let theme = self.theme_store.current();
                terminal.draw(|f| {
                    let state = RenderState {
                        input: &self.input,
                        matches: &visible,
                        selected_idx: self.selected_idx,
                        toggles: &self.toggles,
                        theme: &theme,
                        status: self.status_text(visible.len()),
                        filter_error: self.filter_error.as_deref(),
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(50))?;
            self.handle_action(action);
        }

        self.theme_store.unsubscribe(self.theme_subscription);
        Ok(self.outcome)
    }

    /// Run a debounced search once the input has been idle long enough
    fn tick(&mut self, now: Instant) {
        if let Some(since) = self.pending_since
            && now.duration_since(since) >= self.engine.config().debounce
        {
            self.run_search();
        }
    }

    fn handle_action(&mut self, action: Action) {
        let visible = self.visible_count();
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearSearch => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                    self.current_filter = None;
                    self.filter_error = None;
                    self.run_search();
                }
            }
            Action::MoveUp => self.move_selection(-1, visible),
            Action::MoveDown => self.move_selection(1, visible),
            Action::PageUp => self.move_selection(-PAGE_SIZE, visible),
            Action::PageDown => self.move_selection(PAGE_SIZE, visible),
            Action::Submit => {
                self.apply_filter();
                self.run_search();
            }
            Action::ToggleCategory(category) => {
                self.toggles.toggle(category);
                self.selected_idx = 0;
                self.needs_redraw = true;
            }
            Action::OpenSelected => {
                if let Some(target) = self.selected_match().map(SearchMatch::navigation_target) {
                    debug!(character = %target.character_id, tab = target.tab_index, "open match");
                    self.outcome = Some(target);
                    self.should_quit = true;
                }
            }
            Action::CopyToClipboard => self.copy_selected(),
            Action::CycleTheme => self.theme_store.cycle(),
            Action::UpdateSearch(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::None => {}
        }
        self.sync_theme();
    }

    /// Pick up a theme change signalled through the store subscription
    fn sync_theme(&mut self) {
        if !self.theme_changed.replace(false) {
            return;
        }

        let theme = self.theme_store.current();
        self.engine.set_theme(theme.clone());
        if !self.results.is_empty() {
            self.run_search();
        }
        self.set_status(format!("Theme: {}", theme.name), MessageType::Success);
    }

    fn update_search(&mut self, c: char) {
        if self.input.chars().count() < MAX_QUERY_CHARS {
            self.input.push(c);
            self.pending_since = Some(Instant::now());
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self) {
        if self.input.pop().is_some() {
            self.pending_since = Some(Instant::now());
            self.needs_redraw = true;
        }
    }

    /// Split the input into `(filter, query)` around the first `|`
    ///
    /// Text before the `|` that is neither blank nor contains a `:` is not a filter, and the
    /// whole input is searched as typed.
    fn parse_input(&self) -> (Option<&str>, &str) {
        match self.input.split_once('|') {
            Some((filter, query)) if filter.trim().is_empty() => (None, query.trim()),
            Some((filter, query)) if filter.contains(':') => (Some(filter.trim()), query.trim()),
            _ => (None, self.input.as_str()),
        }
    }

    fn apply_filter(&mut self) {
        let parsed = self.parse_input().0.map(parse_filter);
        match parsed {
            None => {
                self.current_filter = None;
                self.filter_error = None;
            }
            Some(Ok(expr)) => {
                self.current_filter = Some(expr);
                self.filter_error = None;
            }
            Some(Err(e)) => {
                self.current_filter = None;
                self.filter_error = Some(format!(
                    "Parse error: {} | Try: category:timeline character:aria | query",
                    e
                ));
            }
        }
        self.needs_redraw = true;
    }

    fn run_search(&mut self) {
        if self.parse_input().0.is_none() {
            self.current_filter = None;
            self.filter_error = None;
        }

        let query = self.parse_input().1;
        let matches = self.engine.search(query, &self.repository);
        self.results = match &self.current_filter {
            Some(filter) => apply_filters(matches, filter),
            None => matches,
        };
        self.pending_since = None;
        self.selected_idx = 0;
        self.needs_redraw = true;
    }

    fn visible_matches(&self) -> Vec<&SearchMatch> {
        self.toggles.apply(&self.results)
    }

    fn visible_count(&self) -> usize {
        self.results.iter().filter(|m| self.toggles.allows(m.category)).count()
    }

    fn selected_match(&self) -> Option<&SearchMatch> {
        self.visible_matches().get(self.selected_idx).copied()
    }

    fn move_selection(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn copy_selected(&mut self) {
        let Some(selected) = self.selected_match().cloned() else {
            self.set_status("✗ Nothing selected to copy", MessageType::Error);
            return;
        };

        match copy_match_value(&selected, self.clipboard.as_mut()) {
            Ok(()) => self.set_status(
                format!("✓ Copied {} of {}", selected.field, selected.character_name),
                MessageType::Success,
            ),
            Err(e) => self.set_status(format!("✗ Clipboard error: {:#}", e), MessageType::Error),
        }
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType) {
        let duration_ms = match message_type {
            MessageType::Success => STATUS_SUCCESS_DURATION_MS,
            MessageType::Error => STATUS_ERROR_DURATION_MS,
        };
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn clear_expired_status(&mut self, now: Instant) {
        if self.status_message.as_ref().is_some_and(|msg| now >= msg.expires_at) {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    /// Persistent status line shown when no transient message is active
    fn status_text(&self, visible: usize) -> String {
        let min_chars = self.engine.config().min_query_chars;
        if self.engine.parse_query(self.parse_input().1).is_none() {
            return format!("Enter at least {} characters to search", min_chars);
        }
        if self.pending_since.is_some() {
            return "Searching...".to_string();
        }
        if visible == 0 {
            return "No results found".to_string();
        }

        let noun = if visible == 1 { "result" } else { "results" };
        if visible < self.results.len() {
            format!("{} {} ({} hidden by category)", visible, noun, self.results.len() - visible)
        } else {
            format!("{} {}", visible, noun)
        }
    }
}
