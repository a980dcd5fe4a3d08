//! Standalone HTML document assembly.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::error::ConvertError;
use crate::util::escape_html;

/// Document title used when none is given.
pub const DEFAULT_TITLE: &str = "Markdown Document";

/// Document language used when none is given.
pub const DEFAULT_LANG: &str = "en";

/// `strftime` format of the generation timestamp.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const STYLESHEET: &str = "\
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
  line-height: 1.6;
  color: #333;
  max-width: 900px;
  margin: 0 auto;
  padding: 2rem;
  background-color: #ffffff;
}
h1, h2, h3, h4, h5, h6 { margin: 1.5em 0 0.5em 0; font-weight: 600; line-height: 1.25; }
h1 { font-size: 2em; border-bottom: 1px solid #eee; padding-bottom: 0.5em; }
h2 { font-size: 1.5em; border-bottom: 1px solid #eee; padding-bottom: 0.3em; }
h3 { font-size: 1.25em; }
p { margin: 0.8em 0; }
strong { font-weight: 600; }
ul, ol { margin: 0.8em 0; padding-left: 2em; }
li { margin: 0.3em 0; }
blockquote {
  margin: 1em 0;
  padding: 0.5em 1em;
  border-left: 4px solid #007bff;
  background-color: #f8f9fa;
  font-style: italic;
}
code {
  background-color: #f8f9fa;
  padding: 0.2em 0.4em;
  border-radius: 3px;
  font-family: 'Consolas', 'Monaco', monospace;
  font-size: 0.9em;
}
pre { background-color: #f8f9fa; padding: 1em; border-radius: 6px; overflow-x: auto; margin: 1em 0; }
pre code { background-color: transparent; padding: 0; display: block; }
a { color: #007bff; text-decoration: none; }
a:hover { text-decoration: underline; }
img { max-width: 100%; height: auto; border-radius: 6px; }
table { width: 100%; border-collapse: collapse; margin: 1em 0; }
th, td { padding: 0.5em; border: 1px solid #dee2e6; text-align: left; }
th { background-color: #f8f9fa; font-weight: 600; }
hr { border: none; border-top: 2px solid #dee2e6; margin: 2em 0; }
.document-meta {
  color: #6c757d;
  font-size: 0.9em;
  text-align: center;
  margin-bottom: 2em;
  padding-bottom: 1em;
  border-bottom: 1px solid #eee;
}
.table-of-contents { margin: 1em 0 2em; }
.table-of-contents .toc-title { font-weight: 600; margin-bottom: 0.5em; }
.table-of-contents ul { list-style-type: none; padding-left: 1em; }
.table-of-contents li { margin: 0.2em 0; }
.table-of-contents .toc-level-1 { font-weight: 600; }
.table-of-contents a { color: #007bff; }
@media print {
  body { padding: 1rem; }
  .table-of-contents { break-inside: avoid; }
}
";

/// Metadata of a standalone document.
///
/// The timestamp is supplied by the caller; assembly never reads the clock.
#[derive(Clone, Debug)]
pub struct DocumentMeta {
    /// Content of the `<title>` element.
    pub title: String,
    /// Value of the `lang` attribute.
    pub lang: String,
    /// Generation time shown in the document header.
    pub generated_at: NaiveDateTime,
    /// `strftime` format applied to `generated_at`.
    pub timestamp_format: String,
}

impl DocumentMeta {
    /// Create metadata with default title, language and timestamp format.
    #[must_use]
    pub fn new(generated_at: NaiveDateTime) -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            lang: DEFAULT_LANG.to_owned(),
            generated_at,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_owned(),
        }
    }

    /// Set the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the document language.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the timestamp format.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }
}

/// Wrap a rendered body into a complete HTML document.
///
/// # Errors
///
/// Returns [`ConvertError::Format`] if the timestamp format is invalid.
pub fn assemble_document(body: &str, meta: &DocumentMeta) -> Result<String, ConvertError> {
    let mut html = String::with_capacity(body.len() + STYLESHEET.len() + 512);

    writeln!(html, "<!DOCTYPE html>\n<html lang=\"{}\">", escape_html(&meta.lang))?;
    html.push_str("<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    writeln!(html, "<title>{}</title>", escape_html(&meta.title))?;
    html.push_str("<style>\n");
    html.push_str(STYLESHEET);
    html.push_str("</style>\n</head>\n<body>\n");
    writeln!(
        html,
        "<div class=\"document-meta\"><p>Generated: {} | Generated by mdview</p></div>",
        meta.generated_at.format(&meta.timestamp_format)
    )?;
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");

    Ok(html)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_opt(14, 5, 0))
            .unwrap()
    }

    #[test]
    fn test_document_shell() {
        let html = assemble_document("<p>x</p>", &DocumentMeta::new(timestamp())).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.contains("<title>Markdown Document</title>"));
        assert!(html.contains("<style>\nbody {"));
        assert!(html.contains(".table-of-contents .toc-level-1 {"));
        assert!(html.contains("<body>\n<div class=\"document-meta\">"));
        assert!(html.contains("Generated: 2024-03-09 14:05:00 | Generated by mdview"));
        assert!(html.contains("</div>\n<p>x</p>\n</body>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_title_is_escaped() {
        let meta = DocumentMeta::new(timestamp()).with_title("A & <B>");
        let html = assemble_document("", &meta).unwrap();
        assert!(html.contains("<title>A &amp; &lt;B&gt;</title>"));
    }

    #[test]
    fn test_lang_and_timestamp_format() {
        let meta = DocumentMeta::new(timestamp())
            .with_lang("zh-CN")
            .with_timestamp_format("%d/%m/%Y");
        let html = assemble_document("", &meta).unwrap();
        assert!(html.contains("<html lang=\"zh-CN\">"));
        assert!(html.contains("Generated: 09/03/2024 |"));
    }

    #[test]
    fn test_invalid_timestamp_format() {
        let meta = DocumentMeta::new(timestamp()).with_timestamp_format("%Q");
        let result = assemble_document("", &meta);
        assert!(matches!(result, Err(ConvertError::Format(_))));
    }
}
