//! Configurable conversion pipeline.
//!
//! [`Converter`] runs the stages in order: block parsing (with inline
//! formatting), code highlighting, table of contents, whitespace
//! normalization. Highlighting and the table of contents can be switched off.

use std::panic::{self, AssertUnwindSafe};

use crate::block::parse_blocks;
use crate::document::{DocumentMeta, assemble_document};
use crate::error::ConvertError;
use crate::highlight::highlight;
use crate::normalize::normalize;
use crate::toc::build_toc;

/// Returned by [`Converter::convert`] for empty input.
pub const EMPTY_INPUT_MESSAGE: &str = "<p>Enter Markdown content to see a live preview.</p>";

/// Returned by [`Converter::convert`] when the input renders to nothing.
pub const EMPTY_RESULT_MESSAGE: &str = "<p>Please enter valid Markdown content.</p>";

/// Returned by [`Converter::convert`] when conversion fails.
pub const CONVERSION_ERROR_MESSAGE: &str = r#"<p class="conversion-error" style="color: red;">Conversion failed. Please check the Markdown syntax.</p>"#;

/// Markdown to HTML converter.
///
/// # Example
///
/// ```
/// use mdview_renderer::Converter;
///
/// let html = Converter::new()
///     .with_table_of_contents(false)
///     .convert("# Hello\n\n**Bold** text");
/// assert_eq!(html, "<h1 id=\"hello\">Hello</h1>\n<p><strong>Bold</strong> text</p>");
/// ```
#[derive(Clone, Debug)]
pub struct Converter {
    table_of_contents: bool,
    highlight: bool,
    max_input_bytes: Option<usize>,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            table_of_contents: true,
            highlight: true,
            max_input_bytes: None,
        }
    }
}

impl Converter {
    /// Create a converter with every stage enabled and no input limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the table of contents.
    #[must_use]
    pub fn with_table_of_contents(mut self, enabled: bool) -> Self {
        self.table_of_contents = enabled;
        self
    }

    /// Enable or disable code highlighting.
    #[must_use]
    pub fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlight = enabled;
        self
    }

    /// Reject inputs larger than `limit` bytes.
    #[must_use]
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }

    fn validate(&self, markdown: &str) -> Result<(), ConvertError> {
        if let Some(limit) = self.max_input_bytes
            && markdown.len() > limit
        {
            return Err(ConvertError::InputTooLarge {
                len: markdown.len(),
                limit,
            });
        }
        if let Some(offset) = markdown.find('\0') {
            return Err(ConvertError::InvalidCharacter { offset });
        }
        Ok(())
    }

    /// Run the pipeline and return the body markup.
    ///
    /// Unlike [`convert`](Self::convert), empty input and empty output are
    /// returned as empty strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is rejected or a stage fails to write
    /// its markup.
    pub fn try_convert(&self, markdown: &str) -> Result<String, ConvertError> {
        self.validate(markdown)?;
        tracing::debug!(bytes = markdown.len(), "Converting markdown");

        let mut html = parse_blocks(markdown)?;
        if self.highlight {
            html = highlight(&html);
        }
        if self.table_of_contents {
            html = build_toc(&html)?;
        }
        let html = normalize(&html);

        tracing::debug!(bytes = html.len(), "Converted markdown");
        Ok(html)
    }

    /// Convert markdown to body markup. Never fails.
    ///
    /// Empty input, empty output and failures (including panics inside a
    /// stage) are replaced by fixed placeholder fragments.
    ///
    /// A caught panic still passes through the process panic hook, which by
    /// default prints the message to stderr. Install a hook with
    /// [`std::panic::set_hook`] to silence it; the hook is process-global, so
    /// it is left to the caller.
    #[must_use]
    pub fn convert(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return EMPTY_INPUT_MESSAGE.to_owned();
        }

        match catch_panic(|| self.try_convert(markdown)) {
            Ok(html) if html.is_empty() => EMPTY_RESULT_MESSAGE.to_owned(),
            Ok(html) => html,
            Err(e) => {
                tracing::error!(error = %e, "Markdown conversion failed");
                CONVERSION_ERROR_MESSAGE.to_owned()
            }
        }
    }

    /// Convert markdown to a standalone HTML document.
    ///
    /// # Errors
    ///
    /// Returns an error if conversion fails or the timestamp format is
    /// invalid.
    pub fn try_convert_full(
        &self,
        markdown: &str,
        meta: &DocumentMeta,
    ) -> Result<String, ConvertError> {
        let body = self.try_convert(markdown)?;
        assemble_document(&body, meta)
    }

    /// Convert markdown to a standalone HTML document. Never fails.
    ///
    /// The body follows [`convert`](Self::convert); if the document shell
    /// cannot be written the error fragment is returned.
    #[must_use]
    pub fn convert_full(&self, markdown: &str, meta: &DocumentMeta) -> String {
        let body = self.convert(markdown);
        match assemble_document(&body, meta) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(error = %e, "Document assembly failed");
                CONVERSION_ERROR_MESSAGE.to_owned()
            }
        }
    }
}

/// Run `f`, turning a panic into [`ConvertError::Internal`].
///
/// The panic hook is not touched and runs before unwinding starts.
fn catch_panic<F>(f: F) -> Result<String, ConvertError>
where
    F: FnOnce() -> Result<String, ConvertError>,
{
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_owned());
        Err(ConvertError::Internal(message))
    })
}
