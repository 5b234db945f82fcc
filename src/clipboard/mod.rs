use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use crate::models::SearchMatch;

/// Largest value (in bytes) accepted for copying
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Destination for copied text; lets the TUI run against a fake in tests
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Opens the system clipboard for each copy, so a headless session only fails the copy itself
#[derive(Debug, Default, Clone, Copy)]
pub struct OnDemandClipboard;

impl ClipboardProvider for OnDemandClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        SystemClipboard::new()?.set_text(text)
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        bail!("Text too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }

    Ok(())
}

/// Copy a match's full field value (not the clamped snippet) through `provider`
pub fn copy_match_value(m: &SearchMatch, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(&m.value)
        .with_context(|| format!("Cannot copy {} of {}", m.field, m.character_name))?;
    provider.set_text(&m.value)
}

/// Copy text to the system clipboard.
///
/// # Errors
/// Returns error if:
/// - Text is empty
/// - Text is larger than 10MB
/// - System clipboard is unavailable (headless environment) or access is denied
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate before touching the clipboard so headless runs still report input errors
    validate_clipboard_text(text)?;
    OnDemandClipboard.set_text(text)
}
