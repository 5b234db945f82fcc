use std::ops::Range;

/// A normalized search term that has passed the minimum-length gate
///
/// Case folding is per char (`char::to_lowercase`) on both the query and the searched value,
/// so any value matches a query made of the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    chars: Vec<char>,
}

impl SearchQuery {
    /// Trim and fold `raw`; `None` if the trimmed text has fewer than `min_chars` chars
    pub fn parse(raw: &str, min_chars: usize) -> Option<Self> {
        let trimmed = raw.trim();
        let typed = trimmed.chars().count();
        if typed == 0 || typed < min_chars {
            return None;
        }

        let chars: Vec<char> = trimmed.chars().flat_map(char::to_lowercase).collect();
        let term = chars.iter().collect();
        Some(Self { term, chars })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Length of the folded term in chars
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Byte range of the first case-insensitive occurrence in `value`
    ///
    /// `value` is folded char by char, each folded char remembering the byte offset of the
    /// char it came from. A hit counts only when it starts and ends on whole source chars, so
    /// the range always falls on char boundaries of `value`.
    pub fn locate(&self, value: &str) -> Option<Range<usize>> {
        let needle = &self.chars;
        let folded: Vec<(usize, char)> = value
            .char_indices()
            .flat_map(|(byte, ch)| ch.to_lowercase().map(move |lower| (byte, lower)))
            .collect();
        if folded.len() < needle.len() {
            return None;
        }

        let starts_char = |idx: usize| idx == 0 || folded[idx - 1].0 != folded[idx].0;
        let ends_char = |idx: usize| idx == folded.len() || folded[idx].0 != folded[idx - 1].0;

        (0..=folded.len() - needle.len())
            .find(|&start| {
                let end = start + needle.len();
                starts_char(start)
                    && ends_char(end)
                    && needle.iter().zip(&folded[start..end]).all(|(n, (_, h))| n == h)
            })
            .map(|start| {
                let end = start + needle.len();
                let end_byte = folded.get(end).map(|(byte, _)| *byte).unwrap_or(value.len());
                folded[start].0..end_byte
            })
    }

    pub fn matches(&self, value: &str) -> bool {
        self.locate(value).is_some()
    }
}
