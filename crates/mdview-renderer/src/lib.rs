//! Markdown to HTML conversion for a simplified Markdown dialect.
//!
//! The pipeline is a strict sequence of stages, each a pure function over a
//! text buffer:
//!
//! 1. [`parse_blocks`]: headings, fenced code, rules, tables, block quotes,
//!    lists and paragraphs, with [`apply_inline`] applied to text spans
//! 2. [`highlight`]: keyword, string, comment and number spans plus a
//!    language badge for fenced code
//! 3. [`build_toc`]: a table of contents inserted before the first heading
//! 4. [`normalize`]: blank line collapsing and trimming
//! 5. [`assemble_document`]: optional standalone document shell
//!
//! [`Converter`] ties the stages together and never fails: errors and panics
//! become a fixed error fragment.
//!
//! # Example
//!
//! ```
//! let html = mdview_renderer::convert("# Intro\n\nSome *text*.");
//! assert!(html.contains(r#"<nav class="table-of-contents">"#));
//! assert!(html.contains(r#"<h1 id="intro">Intro</h1>"#));
//! assert!(html.contains("<p>Some <em>text</em>.</p>"));
//! ```

mod block;
mod converter;
mod document;
mod error;
mod highlight;
mod inline;
mod normalize;
mod placeholder;
mod stats;
mod toc;
mod util;

pub use block::{
    Block, BlockQuoteRun, CodeBlock, DEFAULT_CODE_LANGUAGE, Heading, ListKind, ListRun, Table,
    classify_blocks, parse_blocks, render_blocks,
};
pub use converter::{
    CONVERSION_ERROR_MESSAGE, Converter, EMPTY_INPUT_MESSAGE, EMPTY_RESULT_MESSAGE,
};
pub use document::{
    DEFAULT_LANG, DEFAULT_TIMESTAMP_FORMAT, DEFAULT_TITLE, DocumentMeta, assemble_document,
};
pub use error::ConvertError;
pub use highlight::{DEFAULT_BADGE_COLOR, Language, badge_color, highlight, highlight_code};
pub use inline::apply_inline;
pub use normalize::normalize;
pub use stats::{Stats, stats};
pub use toc::{TocEntry, build_toc, extract_toc};
pub use util::{escape_html, slugify};

/// Convert markdown to body markup with every stage enabled.
///
/// Never fails; see [`Converter::convert`].
#[must_use]
pub fn convert(markdown: &str) -> String {
    Converter::new().convert(markdown)
}

/// Convert markdown to a standalone document stamped with the local time.
///
/// `title` defaults to [`DEFAULT_TITLE`]. Never fails; see
/// [`Converter::convert_full`].
#[must_use]
pub fn convert_full(markdown: &str, title: Option<&str>) -> String {
    let mut meta = DocumentMeta::new(chrono::Local::now().naive_local());
    if let Some(title) = title {
        meta = meta.with_title(title);
    }
    Converter::new().convert_full(markdown, &meta)
}
