//! Keyword, string, comment and number highlighting for fenced code.
//!
//! Each code body is decoded back to source text once and walked by a single
//! left-to-right tokenizer. Tokens never overlap, so injected spans are never
//! nested or re-scanned, and every token is escaped exactly once.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::util::{escape_html, unescape_html};

/// Fenced code markup as emitted by the block parser.
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-([^"]*)">(.*?)</code></pre>"#)
        .expect("invalid code block regex")
});

/// Badge color for tags without an entry in [`badge_color`].
pub const DEFAULT_BADGE_COLOR: &str = "#666";

const ECMASCRIPT_KEYWORDS: &[&str] = &[
    "function", "var", "let", "const", "if", "else", "for", "while", "do", "return", "class",
    "extends", "import", "export", "default", "async", "await", "new", "this", "typeof",
    "instanceof", "try", "catch", "finally", "throw", "switch", "case", "break", "continue", "of",
    "in", "null", "undefined", "true", "false",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "if", "elif", "else", "for", "while", "return", "import", "from", "as", "try",
    "except", "finally", "with", "lambda", "pass", "break", "continue", "raise", "yield", "and",
    "or", "not", "in", "is", "None", "True", "False", "global", "nonlocal", "async", "await",
];

const JAVA_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "class", "interface", "extends", "implements", "if", "else",
    "for", "while", "return", "static", "final", "void", "new", "this", "super", "abstract",
    "enum", "import", "package", "try", "catch", "finally", "throw", "throws", "switch", "case",
    "break", "continue", "null", "true", "false", "int", "long", "double", "boolean", "char",
];

const CSS_KEYWORDS: &[&str] = &[
    "color", "background", "margin", "padding", "border", "width", "height", "display",
    "position", "font", "top", "right", "bottom", "left", "flex", "grid",
];

const HTML_KEYWORDS: &[&str] = &[
    "html", "head", "body", "title", "meta", "link", "script", "style", "div", "span", "p", "a",
    "img", "ul", "ol", "li", "table", "tr", "td", "th", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Language family selected by a code block's tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    /// JavaScript, TypeScript and relatives.
    EcmaScript,
    /// Python.
    Python,
    /// Java.
    Java,
    /// CSS.
    Css,
    /// HTML and XML.
    Html,
    /// Anything else: generic string and number highlighting only.
    Other,
}

impl Language {
    /// Resolve a code block tag, ignoring case.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "javascript" | "js" | "jsx" | "typescript" | "ts" | "tsx" => Self::EcmaScript,
            "python" | "py" => Self::Python,
            "java" => Self::Java,
            "css" => Self::Css,
            "html" | "xml" => Self::Html,
            _ => Self::Other,
        }
    }

    /// Whole-word keywords, matched case-sensitively.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::EcmaScript => ECMASCRIPT_KEYWORDS,
            Self::Python => PYTHON_KEYWORDS,
            Self::Java => JAVA_KEYWORDS,
            Self::Css => CSS_KEYWORDS,
            Self::Html => HTML_KEYWORDS,
            Self::Other => &[],
        }
    }

    fn line_comment(self) -> Option<&'static str> {
        match self {
            Self::EcmaScript | Self::Java | Self::Css => Some("//"),
            Self::Python => Some("#"),
            Self::Html | Self::Other => None,
        }
    }

    fn block_comment(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::EcmaScript | Self::Java | Self::Css => Some(("/*", "*/")),
            Self::Html => Some(("<!--", "-->")),
            Self::Python | Self::Other => None,
        }
    }
}

/// Badge color for a code block tag, ignoring case.
#[must_use]
pub fn badge_color(tag: &str) -> &'static str {
    match tag.to_ascii_lowercase().as_str() {
        "javascript" | "js" => "#f7df1e",
        "python" => "#3776ab",
        "java" => "#ed8b00",
        "css" => "#1572b6",
        "html" => "#e34f26",
        "json" => "#000000",
        "bash" | "shell" => "#4eaa25",
        "sql" => "#336791",
        "php" => "#777bb4",
        "cpp" | "c" => "#00599c",
        _ => DEFAULT_BADGE_COLOR,
    }
}

#[derive(Clone, Copy)]
enum Token {
    Keyword,
    String,
    Comment,
    Number,
}

impl Token {
    fn class(self) -> &'static str {
        match self {
            Self::Keyword => "hl-keyword",
            Self::String => "hl-string",
            Self::Comment => "hl-comment",
            Self::Number => "hl-number",
        }
    }

    fn style(self) -> &'static str {
        match self {
            Self::Keyword => "color: #d73a49; font-weight: bold;",
            Self::String => "color: #032f62;",
            Self::Comment => "color: #6a737d; font-style: italic;",
            Self::Number => "color: #005cc5;",
        }
    }
}

fn push_span(out: &mut String, token: Token, text: &str) {
    out.push_str(r#"<span class=""#);
    out.push_str(token.class());
    out.push_str(r#"" style=""#);
    out.push_str(token.style());
    out.push_str(r#"">"#);
    out.push_str(&escape_html(text));
    out.push_str("</span>");
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte length of a quoted string starting at the beginning of `text`.
///
/// Backslash escapes are skipped. Single and double quoted strings end at
/// the line; backtick strings may span lines. Returns `None` when the
/// string is not closed.
fn string_len(text: &str, quote: char) -> Option<usize> {
    let mut chars = text.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' if quote != '`' => return None,
            c if c == quote => return Some(i + c.len_utf8()),
            _ => {}
        }
    }
    None
}

/// Byte length of a number that starts with the all-digit word `digits`.
fn number_len(text: &str, digits: usize) -> usize {
    let Some(fraction) = text[digits..].strip_prefix('.') else {
        return digits;
    };
    let fraction_len = fraction
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(fraction.len());
    let standalone = !fraction[fraction_len..].starts_with(is_word_char);
    if fraction_len > 0 && standalone {
        digits + 1 + fraction_len
    } else {
        digits
    }
}

/// Highlight raw source text, returning escaped markup.
///
/// # Examples
///
/// ```
/// use mdview_renderer::{Language, highlight_code};
///
/// let html = highlight_code("return 1", Language::EcmaScript);
/// assert!(html.starts_with(r#"<span class="hl-keyword""#));
/// ```
#[must_use]
pub fn highlight_code(source: &str, language: Language) -> String {
    let keywords = language.keywords();
    let mut out = String::with_capacity(source.len() * 2);
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        if let Some((open, close)) = language.block_comment()
            && rest.starts_with(open)
        {
            let end = rest[open.len()..]
                .find(close)
                .map_or(rest.len(), |i| open.len() + i + close.len());
            push_span(&mut out, Token::Comment, &rest[..end]);
            rest = &rest[end..];
            continue;
        }

        if let Some(marker) = language.line_comment()
            && rest.starts_with(marker)
        {
            let end = rest.find('\n').unwrap_or(rest.len());
            push_span(&mut out, Token::Comment, &rest[..end]);
            rest = &rest[end..];
            continue;
        }

        if matches!(c, '"' | '\'' | '`')
            && let Some(end) = string_len(rest, c)
        {
            push_span(&mut out, Token::String, &rest[..end]);
            rest = &rest[end..];
            continue;
        }

        if is_word_char(c) {
            let end = rest.find(|ch: char| !is_word_char(ch)).unwrap_or(rest.len());
            let word = &rest[..end];
            if keywords.contains(&word) {
                push_span(&mut out, Token::Keyword, word);
                rest = &rest[end..];
            } else if word.chars().all(|ch| ch.is_ascii_digit()) {
                let end = number_len(rest, end);
                push_span(&mut out, Token::Number, &rest[..end]);
                rest = &rest[end..];
            } else {
                out.push_str(&escape_html(word));
                rest = &rest[end..];
            }
            continue;
        }

        out.push_str(&escape_html(&rest[..c.len_utf8()]));
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Render the floating language badge for a code block.
fn language_badge(tag: &str) -> String {
    format!(
        r#"<span class="language-label" style="position: absolute; top: 5px; right: 10px; font-size: 0.7em; color: {}; font-weight: bold;">{}</span>"#,
        badge_color(tag),
        tag.to_uppercase()
    )
}

/// Highlight every fenced code block in block markup.
///
/// Rewrites `<pre><code class="language-TAG">BODY</code></pre>` into a code
/// element carrying `data-lang`, a language badge and highlighted body.
/// Inline `<code>` elements are left alone.
///
/// # Examples
///
/// ```
/// use mdview_renderer::highlight;
///
/// let html = highlight(r#"<pre><code class="language-python">print(1)</code></pre>"#);
/// assert!(html.contains(r#"data-lang="python""#));
/// assert!(html.contains(">PYTHON</span>"));
/// ```
#[must_use]
pub fn highlight(markup: &str) -> String {
    let mut blocks = 0usize;
    let html = CODE_BLOCK.replace_all(markup, |caps: &Captures<'_>| {
        blocks += 1;
        let tag = &caps[1];
        let source = unescape_html(&caps[2]);
        format!(
            r#"<pre><code class="language-{tag}" data-lang="{tag}" style="position: relative;">{}{}</code></pre>"#,
            language_badge(tag),
            highlight_code(&source, Language::from_tag(tag))
        )
    });
    tracing::debug!(blocks, "Highlighted code blocks");
    html.into_owned()
}
