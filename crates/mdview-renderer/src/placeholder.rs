//! Opaque placeholders for markup that later transforms must not see.
//!
//! A transform that emits markup containing characters other transforms
//! react to (`*` in a URL, backticks in an attribute) parks that markup
//! here and leaves a token in the text. Tokens are built from private-use
//! code points that no inline pattern matches, so each later transform
//! skips them. [`Placeholders::restore`] swaps the markup back in once all
//! transforms are done.
//!
//! Input text may itself contain the delimiter code points. [`Placeholders::protect`]
//! parks each of them as a literal entry first, so every delimiter left in
//! the working text starts or ends a real token.

/// Opening delimiter of a placeholder token.
const OPEN: char = '\u{E000}';
/// Closing delimiter of a placeholder token.
const CLOSE: char = '\u{E001}';

/// Collects parked markup for later restoration.
///
/// # Example
///
/// ```text
/// let mut placeholders = Placeholders::new();
/// let text = placeholders.protect(input);
/// let token = placeholders.park("<code>*x*</code>".to_owned());
/// let text = format!("{text} {token}");
/// // ... transforms that would otherwise turn *x* into <em>x</em> ...
/// let html = placeholders.restore(&text);
/// ```
#[derive(Debug, Default)]
pub(crate) struct Placeholders {
    items: Vec<String>,
}

impl Placeholders {
    /// Create an empty collector.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Park markup and return the token standing in for it.
    pub(crate) fn park(&mut self, markup: String) -> String {
        let token = format!("{OPEN}{}{CLOSE}", self.items.len());
        self.items.push(markup);
        token
    }

    /// Replace delimiter code points already present in `text` with tokens.
    ///
    /// Must run before any transform parks markup.
    pub(crate) fn protect(&mut self, text: &str) -> String {
        if !text.contains([OPEN, CLOSE]) {
            return text.to_owned();
        }
        let mut out = String::with_capacity(text.len() + 8);
        for c in text.chars() {
            if c == OPEN || c == CLOSE {
                let token = self.park(c.to_string());
                out.push_str(&token);
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Replace every token in `text` with its parked markup.
    ///
    /// A single left-to-right scan: restored markup is expanded on its own
    /// (it may hold tokens of earlier entries, such as a link URL holding an
    /// inline code span) and never re-scanned as part of the surrounding text.
    pub(crate) fn restore(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.expand(text, &mut out);
        out
    }

    fn expand(&self, text: &str, out: &mut String) {
        let mut rest = text;
        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len_utf8()..];
            let parked = after.find(CLOSE).and_then(|end| {
                let index: usize = after[..end].parse().ok()?;
                self.items.get(index).map(|markup| (markup, end))
            });
            match parked {
                Some((markup, end)) => {
                    self.expand(markup, out);
                    rest = &after[end + CLOSE.len_utf8()..];
                }
                None => {
                    out.push(OPEN);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_placeholders() {
        let placeholders = Placeholders::new();
        assert_eq!(placeholders.restore("unchanged"), "unchanged");
    }

    #[test]
    fn test_park_and_restore() {
        let mut placeholders = Placeholders::new();
        let token = placeholders.park("<b>x</b>".to_owned());
        assert!(!token.contains('<'));
        let text = format!("a {token} b");
        assert_eq!(placeholders.restore(&text), "a <b>x</b> b");
    }

    #[test]
    fn test_restore_nested_tokens() {
        let mut placeholders = Placeholders::new();
        let inner = placeholders.park("<code>x</code>".to_owned());
        let outer = placeholders.park(format!("<a href=\"{inner}\">"));
        let text = format!("{outer}link</a>");
        assert_eq!(
            placeholders.restore(&text),
            "<a href=\"<code>x</code>\">link</a>"
        );
    }

    #[test]
    fn test_restore_repeated_token() {
        let mut placeholders = Placeholders::new();
        let token = placeholders.park("!".to_owned());
        let text = format!("{token}{token}");
        assert_eq!(placeholders.restore(&text), "!!");
    }

    #[test]
    fn test_protect_keeps_literal_delimiters() {
        let mut placeholders = Placeholders::new();
        let input = "\u{E000}\u{E000}0\u{E001} and \u{E001}";
        let text = placeholders.protect(input);
        let token = placeholders.park("<b>x</b>".to_owned());
        let text = format!("{text}{token}");
        assert_eq!(placeholders.restore(&text), format!("{input}<b>x</b>"));
    }

    #[test]
    fn test_protect_without_delimiters_parks_nothing() {
        let mut placeholders = Placeholders::new();
        assert_eq!(placeholders.protect("plain"), "plain");
        assert_eq!(placeholders.park(String::new()), "\u{E000}0\u{E001}");
    }
}
