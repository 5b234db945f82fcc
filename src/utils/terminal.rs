//! Output sanitisation for roster text printed to a terminal.
//!
//! Character sheets are free text typed by players; a pasted escape sequence in a backstory
//! must not be able to recolour or clear the user's terminal when `search` prints it.

/// Removes ANSI CSI sequences and control characters (tab and newline are kept)
///
/// # Examples
///
/// ```
/// use medieval_character_manager::utils::terminal::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31mRed Baron\x1b[0m"), "Red Baron");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // CSI runs until its final letter
                while let Some(next_ch) = chars.next() {
                    if next_ch.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Sanitises and folds the text onto one line for list output
pub fn single_line(text: &str) -> String {
    sanitize_for_terminal(text)
        .chars()
        .map(|ch| if ch == '\n' || ch == '\t' { ' ' } else { ch })
        .collect()
}
