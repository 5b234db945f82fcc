//! Snippet policies for rendering a matched field.
//!
//! Short fields (names, places, titles, tags) are shown whole with the match highlighted.
//! Long fields (biography text, descriptions) are cut to a window of context around the match.

use std::ops::Range;

use crate::models::Snippet;

/// Which snippet policy a field uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetPolicy {
    Highlight,
    Context,
}

/// Whole value with `found` marked.
/// Without a match the value is returned unmarked.
pub fn highlight(value: &str, found: Option<Range<usize>>) -> Snippet {
    match found {
        Some(range) => Snippet {
            leading_ellipsis: false,
            before: value[..range.start].to_string(),
            matched: value[range.clone()].to_string(),
            after: value[range.end..].to_string(),
            trailing_ellipsis: false,
        },
        None => Snippet { before: value.to_string(), ..Snippet::default() },
    }
}

/// Up to `radius` chars either side of `found`, with ellipses where content was cut.
/// Without a match the first `fallback_chars` chars are returned, followed by an ellipsis.
pub fn context(
    value: &str,
    found: Option<Range<usize>>,
    radius: usize,
    fallback_chars: usize,
) -> Snippet {
    let Some(range) = found else {
        return Snippet {
            before: take_chars(value, fallback_chars).to_string(),
            trailing_ellipsis: true,
            ..Snippet::default()
        };
    };

    let head = &value[..range.start];
    let tail = &value[range.end..];

    let head_chars = head.chars().count();
    let before_start = if head_chars > radius {
        head.char_indices().nth(head_chars - radius).map(|(idx, _)| idx).unwrap_or(0)
    } else {
        0
    };
    let after_end = tail.char_indices().nth(radius).map(|(idx, _)| idx).unwrap_or(tail.len());

    Snippet {
        leading_ellipsis: before_start > 0,
        before: head[before_start..].to_string(),
        matched: value[range].to_string(),
        after: tail[..after_end].to_string(),
        trailing_ellipsis: after_end < tail.len(),
    }
}

pub fn render(
    policy: SnippetPolicy,
    value: &str,
    found: Option<Range<usize>>,
    radius: usize,
    fallback_chars: usize,
) -> Snippet {
    match policy {
        SnippetPolicy::Highlight => highlight(value, found),
        SnippetPolicy::Context => context(value, found, radius, fallback_chars),
    }
}

fn take_chars(value: &str, n: usize) -> &str {
    match value.char_indices().nth(n) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
