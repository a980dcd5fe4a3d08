//! Block-level parsing.
//!
//! Lines are classified in a fixed precedence order:
//!
//! 1. fenced code blocks
//! 2. headings
//! 3. horizontal rules
//! 4. tables
//! 5. block quotes
//! 6. lists
//! 7. raw markup lines and paragraphs
//!
//! A line claimed by an earlier rule is never seen by a later one, so code
//! bodies are never reformatted and emitted markup is never re-matched.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConvertError;
use crate::inline::apply_inline;
use crate::util::{escape_html, is_markup_line, normalize_line_endings, slugify};

/// Language tag assigned to fenced code blocks that declare none.
pub const DEFAULT_CODE_LANGUAGE: &str = "text";

static FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*```([A-Za-z0-9_+#.-]*)[ \t]*$").expect("invalid fence regex")
});

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.+)$").expect("invalid heading regex"));

static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|_{3,}|\*{3,})$").expect("invalid rule regex"));

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+(.+)$").expect("invalid ordered item regex"));

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.+)$").expect("invalid unordered item regex"));

/// Marker that opens a block quote line.
const QUOTE_MARKER: &str = "> ";

/// A heading line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-6), the number of leading `#`.
    pub level: u8,
    /// Display text with surrounding whitespace trimmed.
    pub text: String,
    /// Anchor identifier derived from `text`. Not unique across headings.
    pub id: String,
}

impl Heading {
    /// Build a heading from its level and raw text.
    #[must_use]
    pub fn new(level: u8, text: &str) -> Self {
        let text = text.trim();
        Self {
            level,
            id: slugify(text),
            text: text.to_owned(),
        }
    }
}

/// A fenced code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    /// Declared language tag, [`DEFAULT_CODE_LANGUAGE`] when absent.
    pub language: String,
    /// Raw body, escaped only when rendered.
    pub body: String,
}

/// Kind of list marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// `1.` style markers.
    Ordered,
    /// `-`, `*` or `+` markers.
    Unordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered => "ul",
        }
    }
}

/// A maximal run of same-kind list items, rendered flat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRun {
    /// Marker kind shared by all items.
    pub kind: ListKind,
    /// Item texts without their markers.
    pub items: Vec<String>,
}

/// A maximal run of `> ` lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockQuoteRun {
    /// Line contents without the quote marker.
    pub lines: Vec<String>,
}

/// A pipe table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    /// Header cells.
    pub header: Vec<String>,
    /// Body rows.
    pub rows: Vec<Vec<String>>,
}

/// A classified block construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Fenced code.
    Code(CodeBlock),
    /// Heading.
    Heading(Heading),
    /// Horizontal rule.
    Rule,
    /// Pipe table.
    Table(Table),
    /// Block quote.
    Quote(BlockQuoteRun),
    /// Flat list.
    List(ListRun),
    /// Line that already starts with a tag, emitted unmodified.
    Markup(String),
    /// Consecutive plain lines, each trimmed.
    Paragraph(Vec<String>),
}

/// Parse markdown text into block markup.
///
/// Line endings are normalized before parsing. Inline formatting is applied
/// to every plain-text span; code bodies are escaped and left unformatted.
///
/// # Examples
///
/// ```
/// use mdview_renderer::parse_blocks;
///
/// let html = parse_blocks("# Title\n\nHello *world*").unwrap();
/// assert_eq!(html, "<h1 id=\"title\">Title</h1>\n<p>Hello <em>world</em></p>");
/// ```
pub fn parse_blocks(raw: &str) -> Result<String, ConvertError> {
    let text = normalize_line_endings(raw);
    let blocks = classify_blocks(&text);
    tracing::debug!(blocks = blocks.len(), "Classified blocks");
    render_blocks(&blocks)
}

/// Classify newline-separated text into blocks.
#[must_use]
pub fn classify_blocks(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut blocks = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];

        let claimed = fenced_code(&lines, index)
            .or_else(|| heading(line).map(|block| (block, index + 1)))
            .or_else(|| is_rule(line).then_some((Block::Rule, index + 1)))
            .or_else(|| table(&lines, index))
            .or_else(|| quote_run(&lines, index))
            .or_else(|| list_run(&lines, index));

        if let Some((block, next)) = claimed {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(block);
            index = next;
            continue;
        }

        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
        } else if is_markup_line(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Markup(line.to_owned()));
        } else {
            paragraph.push(line.trim().to_owned());
        }
        index += 1;
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

/// Render classified blocks, one block per line.
pub fn render_blocks(blocks: &[Block]) -> Result<String, ConvertError> {
    let mut out = String::with_capacity(blocks.len() * 64);
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_block(block, &mut out)?;
    }
    Ok(out)
}

fn render_block(block: &Block, out: &mut String) -> Result<(), ConvertError> {
    match block {
        Block::Code(code) => write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(&code.language),
            escape_html(&code.body)
        )?,
        Block::Heading(heading) => write!(
            out,
            r#"<h{level} id="{}">{}</h{level}>"#,
            heading.id,
            apply_inline(&heading.text),
            level = heading.level
        )?,
        Block::Rule => out.push_str("<hr>"),
        Block::Table(table) => {
            out.push_str("<table><thead><tr>");
            for cell in &table.header {
                write!(out, "<th>{}</th>", apply_inline(cell))?;
            }
            out.push_str("</tr></thead><tbody>");
            for row in &table.rows {
                out.push_str("<tr>");
                for cell in row {
                    write!(out, "<td>{}</td>", apply_inline(cell))?;
                }
                out.push_str("</tr>");
            }
            out.push_str("</tbody></table>");
        }
        Block::Quote(quote) => {
            let lines: Vec<String> = quote.lines.iter().map(|l| apply_inline(l)).collect();
            write!(out, "<blockquote>{}</blockquote>", lines.join("<br>"))?;
        }
        Block::List(list) => {
            let tag = list.kind.tag();
            write!(out, "<{tag}>")?;
            for item in &list.items {
                write!(out, "<li>{}</li>", apply_inline(item))?;
            }
            write!(out, "</{tag}>")?;
        }
        Block::Markup(line) => out.push_str(line),
        Block::Paragraph(lines) => {
            let lines: Vec<String> = lines.iter().map(|l| apply_inline(l)).collect();
            write!(out, "<p>{}</p>", lines.join(" ").trim())?;
        }
    }
    Ok(())
}

fn flush_paragraph(paragraph: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

/// Match a fenced code block opening at `start`.
///
/// The block closes at the first later line that starts with three
/// backticks after indentation, or that ends with three backticks; in the
/// latter case the text before them is the last body line. Returns the
/// block and the index of the line after the closing fence. An opening
/// fence without a closing one is not a code block.
fn fenced_code(lines: &[&str], start: usize) -> Option<(Block, usize)> {
    let caps = FENCE_OPEN.captures(lines[start])?;
    let (close, tail) = lines[start + 1..]
        .iter()
        .enumerate()
        .find_map(|(offset, line)| {
            let index = start + 1 + offset;
            if line.trim_start().starts_with("```") {
                Some((index, None))
            } else {
                line.trim_end()
                    .strip_suffix("```")
                    .map(|content| (index, Some(content)))
            }
        })?;

    let mut body_lines: Vec<&str> = lines[start + 1..close].to_vec();
    body_lines.extend(tail);
    let first = body_lines.iter().position(|l| !l.trim().is_empty());
    let last = body_lines.iter().rposition(|l| !l.trim().is_empty());
    let body = match (first, last) {
        (Some(first), Some(last)) => body_lines[first..=last].join("\n"),
        _ => String::new(),
    };

    let language = match &caps[1] {
        "" => DEFAULT_CODE_LANGUAGE.to_owned(),
        lang => lang.to_owned(),
    };

    Some((Block::Code(CodeBlock { language, body }), close + 1))
}

fn heading(line: &str) -> Option<Block> {
    let caps = HEADING.captures(line)?;
    let text = caps[2].trim();
    if text.is_empty() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)] // at most 6 markers
    let level = caps[1].len() as u8;
    Some(Block::Heading(Heading::new(level, text)))
}

fn is_rule(line: &str) -> bool {
    RULE.is_match(line.trim_end())
}

fn is_table_row(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= 3 && line.starts_with('|') && line.ends_with('|')
}

fn is_table_separator(line: &str) -> bool {
    is_table_row(line)
        && line
            .trim_end()
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

/// Split a table line into trimmed cells, dropping empty cells at either end.
fn split_cells(line: &str) -> Vec<String> {
    let cells: Vec<&str> = line.split('|').map(str::trim).collect();
    let Some(first) = cells.iter().position(|c| !c.is_empty()) else {
        return Vec::new();
    };
    let last = cells.iter().rposition(|c| !c.is_empty()).unwrap_or(first);
    cells[first..=last].iter().map(|c| (*c).to_owned()).collect()
}

fn table(lines: &[&str], start: usize) -> Option<(Block, usize)> {
    let header = lines[start];
    let separator = lines.get(start + 1)?;
    if !is_table_row(header) || !is_table_separator(separator) {
        return None;
    }

    let mut next = start + 2;
    let mut rows = Vec::new();
    while let Some(line) = lines.get(next)
        && is_table_row(line)
    {
        rows.push(split_cells(line));
        next += 1;
    }

    let table = Table {
        header: split_cells(header),
        rows,
    };
    Some((Block::Table(table), next))
}

fn quote_run(lines: &[&str], start: usize) -> Option<(Block, usize)> {
    let quoted: Vec<String> = lines[start..]
        .iter()
        .map_while(|line| line.strip_prefix(QUOTE_MARKER))
        .map(str::to_owned)
        .collect();
    if quoted.is_empty() {
        return None;
    }
    let next = start + quoted.len();
    Some((Block::Quote(BlockQuoteRun { lines: quoted }), next))
}

/// Match a single list item line, ordered markers taking precedence.
fn list_item(line: &str) -> Option<(ListKind, String)> {
    let (kind, caps) = if let Some(caps) = ORDERED_ITEM.captures(line) {
        (ListKind::Ordered, caps)
    } else {
        (ListKind::Unordered, UNORDERED_ITEM.captures(line)?)
    };
    let text = caps[1].trim();
    (!text.is_empty()).then(|| (kind, text.to_owned()))
}

fn list_run(lines: &[&str], start: usize) -> Option<(Block, usize)> {
    let (kind, first) = list_item(lines[start])?;
    let mut items = vec![first];
    let mut next = start + 1;

    while let Some(line) = lines.get(next)
        && let Some((item_kind, text)) = list_item(line)
        && item_kind == kind
    {
        items.push(text);
        next += 1;
    }

    Some((Block::List(ListRun { kind, items }), next))
}
