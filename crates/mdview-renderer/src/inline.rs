//! Span-level formatting.
//!
//! Transforms run in a fixed order, each over the output of the previous:
//!
//! 1. inline code spans are parked first, so nothing inside them is touched
//! 2. images (`![alt](url)`), before links so the `!` is not left behind
//! 3. links (`[text](url)`), before emphasis so URLs keep their `*` and `~`
//! 4. bold (`**x**`), before italic so `*` pairs are claimed by bold first
//! 5. italic (`*x*`)
//! 6. strikethrough (`~~x~~`)
//!
//! Parked markup is restored at the end, which puts escaped inline code last.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::placeholder::Placeholders;
use crate::util::escape_html;

static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("invalid code span regex"));

static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("invalid image regex")
});

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("invalid link regex"));

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("invalid bold regex"));

static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("invalid italic regex"));

static STRIKETHROUGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^~]+)~~").expect("invalid strikethrough regex"));

/// Apply inline formatting to a plain-text span.
///
/// Only text inside inline code spans and attribute values is escaped; the
/// rest of the span is emitted as written.
///
/// # Examples
///
/// ```
/// use mdview_renderer::apply_inline;
///
/// assert_eq!(
///     apply_inline("**bold** and `<tag>`"),
///     "<strong>bold</strong> and <code>&lt;tag&gt;</code>"
/// );
/// ```
#[must_use]
pub fn apply_inline(text: &str) -> String {
    let mut placeholders = Placeholders::new();
    let text = placeholders.protect(text);

    let text = CODE_SPAN.replace_all(&text, |caps: &Captures<'_>| {
        placeholders.park(format!("<code>{}</code>", escape_html(&caps[1])))
    });

    let text = IMAGE.replace_all(&text, |caps: &Captures<'_>| {
        placeholders.park(format!(
            r#"<img src="{}" alt="{}" />"#,
            escape_html(&caps[2]),
            escape_html(&caps[1])
        ))
    });

    let text = LINK.replace_all(&text, |caps: &Captures<'_>| {
        let open = placeholders.park(format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">"#,
            escape_html(&caps[2])
        ));
        format!("{open}{}</a>", &caps[1])
    });

    let text = BOLD.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    let text = STRIKETHROUGH.replace_all(&text, "<del>${1}</del>");

    placeholders.restore(&text)
}
