//! Shared utility functions for markdown conversion.

/// Escape HTML special characters.
///
/// # Examples
///
/// ```
/// use mdview_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#x27;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Reverse [`escape_html`].
///
/// Only the five entities produced by [`escape_html`] are decoded.
#[must_use]
pub(crate) fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Convert heading text to an anchor identifier.
///
/// Lowercases, drops everything except letters, digits, `_`, whitespace and
/// `-`, then turns each run of whitespace and dashes into a single dash.
/// Leading and trailing dashes are removed.
///
/// # Examples
///
/// ```
/// use mdview_renderer::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("What's New?"), "whats-new");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.trim().chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
        } else if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        }
    }

    slug
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
#[must_use]
pub(crate) fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Check whether a line already starts with an HTML tag.
///
/// Such lines are passed through by the paragraph stage untouched.
#[must_use]
pub(crate) fn is_markup_line(line: &str) -> bool {
    line.trim()
        .strip_prefix('<')
        .and_then(|rest| rest.find('>'))
        .is_some_and(|end| end > 0)
}

/// Remove HTML tags, keeping the text between them.
#[must_use]
pub(crate) fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}
