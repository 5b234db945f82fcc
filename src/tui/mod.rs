//! Interactive search dialog for the terminal.
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
use tracing::info;

use self::terminal::TerminalGuard;
use crate::models::NavigationTarget;
use crate::repository::CharacterRepository;
use crate::search::SearchEngine;
use crate::theme::ThemeStore;

/// Run the search dialog over `repository`.
///
/// Returns the navigation target of the match opened with Tab, or `None` when the user quits.
pub fn run_interactive<R: CharacterRepository>(
    repository: R,
    engine: SearchEngine,
    theme_store: ThemeStore,
) -> Result<Option<NavigationTarget>> {
    info!("Opening search dialog over {} characters", repository.count());

    let mut guard = TerminalGuard::enter()?;
    let outcome = App::new(repository, engine, theme_store).run(guard.terminal_mut());
    guard.restore()?;

    outcome
}
