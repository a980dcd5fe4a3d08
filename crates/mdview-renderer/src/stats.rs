//! Document statistics over raw Markdown input.

/// Counts computed from raw input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Unicode scalar values.
    pub characters: usize,
    /// Whitespace-separated tokens.
    pub words: usize,
    /// Newline-separated lines.
    pub lines: usize,
    /// Non-blank chunks separated by an empty line.
    pub paragraphs: usize,
}

/// Compute statistics for raw Markdown input.
///
/// Empty input gives all zeros.
///
/// # Examples
///
/// ```
/// use mdview_renderer::{Stats, stats};
///
/// assert_eq!(
///     stats("a b\nc"),
///     Stats { characters: 5, words: 3, lines: 2, paragraphs: 1 }
/// );
/// ```
#[must_use]
pub fn stats(text: &str) -> Stats {
    if text.is_empty() {
        return Stats::default();
    }

    Stats {
        characters: text.chars().count(),
        words: text.split_whitespace().count(),
        lines: text.split('\n').count(),
        paragraphs: text
            .split("\n\n")
            .filter(|chunk| !chunk.trim().is_empty())
            .count(),
    }
}
