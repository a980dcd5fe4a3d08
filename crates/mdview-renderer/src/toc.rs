//! Table of contents generation from emitted heading markup.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConvertError;
use crate::util::strip_tags;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<h([1-6]) id="([^"]*)">(.*?)</h[1-6]>"#).expect("invalid heading regex")
});

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Anchor ID for linking.
    pub id: String,
    /// Heading text with markup removed.
    pub title: String,
}

/// Collect heading entries from markup in document order.
///
/// # Examples
///
/// ```
/// use mdview_renderer::extract_toc;
///
/// let entries = extract_toc(r#"<h2 id="setup">Set <em>up</em></h2>"#);
/// assert_eq!(entries[0].title, "Set up");
/// ```
#[must_use]
pub fn extract_toc(markup: &str) -> Vec<TocEntry> {
    HEADING
        .captures_iter(markup)
        .map(|caps| TocEntry {
            level: caps[1].parse().unwrap_or(1),
            id: caps[2].to_owned(),
            title: strip_tags(&caps[3]).trim().to_owned(),
        })
        .collect()
}

/// Insert a table of contents before the first heading.
///
/// Entries form a flat list. Each carries a `toc-level-N` class and a
/// `padding-left` of one `em` per level below 1, so depth survives
/// whitespace collapsing. Markup without headings is returned unchanged.
///
/// # Errors
///
/// Returns [`ConvertError::Format`] if writing the outline fails.
pub fn build_toc(markup: &str) -> Result<String, ConvertError> {
    let Some(first) = HEADING.find(markup) else {
        tracing::debug!("No headings, skipping table of contents");
        return Ok(markup.to_owned());
    };

    let entries = extract_toc(markup);
    let mut nav = String::from(
        "<nav class=\"table-of-contents\">\n<div class=\"toc-title\">Table of Contents</div>\n<ul>\n",
    );
    for entry in &entries {
        let depth = entry.level.saturating_sub(1);
        let indent = "  ".repeat(usize::from(depth));
        writeln!(
            nav,
            r##"{indent}<li class="toc-level-{}" style="padding-left: {depth}em;"><a href="#{}">{}</a></li>"##,
            entry.level, entry.id, entry.title
        )?;
    }
    nav.push_str("</ul>\n</nav>\n");

    tracing::debug!(headings = entries.len(), "Built table of contents");

    let mut out = String::with_capacity(markup.len() + nav.len());
    out.push_str(&markup[..first.start()]);
    out.push_str(&nav);
    out.push_str(&markup[first.start()..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_headings_is_noop() {
        let markup = "<p>text</p>\n<ul><li>x</li></ul>";
        assert_eq!(build_toc(markup).unwrap(), markup);
        assert!(extract_toc(markup).is_empty());
    }

    #[test]
    fn test_two_levels() {
        let markup = "<h1 id=\"a\">A</h1>\n<h2 id=\"b\">B</h2>";
        assert_eq!(
            build_toc(markup).unwrap(),
            "<nav class=\"table-of-contents\">\n\
             <div class=\"toc-title\">Table of Contents</div>\n\
             <ul>\n\
             <li class=\"toc-level-1\" style=\"padding-left: 0em;\"><a href=\"#a\">A</a></li>\n  \
             <li class=\"toc-level-2\" style=\"padding-left: 1em;\"><a href=\"#b\">B</a></li>\n\
             </ul>\n\
             </nav>\n\
             <h1 id=\"a\">A</h1>\n\
             <h2 id=\"b\">B</h2>"
        );
    }

    #[test]
    fn test_inserted_before_first_heading() {
        let markup = "<p>intro</p>\n<h3 id=\"x\">X</h3>";
        let html = build_toc(markup).unwrap();
        assert!(html.starts_with("<p>intro</p>\n<nav class=\"table-of-contents\">"));
        assert!(html.contains(
            "    <li class=\"toc-level-3\" style=\"padding-left: 2em;\"><a href=\"#x\">X</a></li>"
        ));
        assert!(html.ends_with("</nav>\n<h3 id=\"x\">X</h3>"));
    }

    #[test]
    fn test_depth_is_styled_not_only_indented() {
        let markup = "<h1 id=\"a\">A</h1>\n<h2 id=\"b\">B</h2>\n<h4 id=\"c\">C</h4>";
        let html = build_toc(markup).unwrap();
        let items: Vec<&str> = html.lines().filter(|l| l.contains("<li")).collect();
        assert_eq!(items.len(), 3);
        assert!(
            items[0]
                .trim_start()
                .starts_with(r#"<li class="toc-level-1" style="padding-left: 0em;">"#)
        );
        assert!(
            items[1]
                .trim_start()
                .starts_with(r#"<li class="toc-level-2" style="padding-left: 1em;">"#)
        );
        assert!(
            items[2]
                .trim_start()
                .starts_with(r#"<li class="toc-level-4" style="padding-left: 3em;">"#)
        );
    }

    #[test]
    fn test_title_strips_markup() {
        let entries = extract_toc("<h2 id=\"use-bold\">Use <strong>bold</strong></h2>");
        assert_eq!(
            entries,
            vec![TocEntry {
                level: 2,
                id: "use-bold".to_owned(),
                title: "Use bold".to_owned(),
            }]
        );
    }

    #[test]
    fn test_duplicate_ids_preserved() {
        let entries = extract_toc("<h2 id=\"same\">Same</h2>\n<h2 id=\"same\">Same</h2>");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, entries[1].id);
    }

    #[test]
    fn test_headings_inside_code_are_escaped_and_ignored() {
        let markup = "<pre><code class=\"language-html\">&lt;h1 id=&quot;a&quot;&gt;A&lt;/h1&gt;</code></pre>";
        assert_eq!(build_toc(markup).unwrap(), markup);
    }
}
