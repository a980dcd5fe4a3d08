//! Whitespace cleanup of the final markup.

use std::sync::LazyLock;

use regex::Regex;

/// Two or more consecutive blank lines.
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").expect("invalid blank run regex"));

/// Collapse runs of blank lines into one and trim the document.
///
/// Applies everywhere, including inside `<pre>` blocks.
///
/// # Examples
///
/// ```
/// use mdview_renderer::normalize;
///
/// assert_eq!(normalize("\n<p>a</p>\n\n\n\n<p>b</p>\n"), "<p>a</p>\n\n<p>b</p>");
/// ```
#[must_use]
pub fn normalize(markup: &str) -> String {
    BLANK_RUN.replace_all(markup, "\n\n").trim().to_owned()
}
