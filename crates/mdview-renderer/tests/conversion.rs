//! End-to-end conversion tests through the public API.

use chrono::NaiveDate;
use mdview_renderer::{
    CONVERSION_ERROR_MESSAGE, Converter, DocumentMeta, EMPTY_INPUT_MESSAGE, Stats, build_toc,
    convert, convert_full, escape_html, normalize, stats,
};
use pretty_assertions::assert_eq;

#[test]
fn test_escaping_is_applied_once() {
    assert_eq!(escape_html(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#x27;");

    let html = convert("```\n&<>\"'\n```");
    assert!(html.contains("&amp;&lt;&gt;&quot;&#x27;"));
    assert!(!html.contains("&amp;amp;"));
    assert!(!html.contains("&amp;lt;"));
}

#[test]
fn test_heading_levels() {
    for level in 1..=6 {
        let markdown = format!("{} Title", "#".repeat(level));
        let html = Converter::new()
            .with_table_of_contents(false)
            .convert(&markdown);
        assert_eq!(html, format!("<h{level} id=\"title\">Title</h{level}>"));
    }
}

#[test]
fn test_no_headings_means_no_outline() {
    let html = convert("plain paragraph\n\n- item");
    assert!(!html.contains("table-of-contents"));
    assert_eq!(build_toc("<p>x</p>").unwrap(), "<p>x</p>");
}

#[test]
fn test_outline_for_two_headings() {
    let html = convert("# A\n\n## B");
    let nav_start = html.find("<nav class=\"table-of-contents\">").unwrap();
    let first_heading = html.find("<h1").unwrap();
    assert!(nav_start < first_heading);
    assert!(html.contains(
        "\n<li class=\"toc-level-1\" style=\"padding-left: 0em;\"><a href=\"#a\">A</a></li>\n"
    ));
    assert!(html.contains(
        "\n  <li class=\"toc-level-2\" style=\"padding-left: 1em;\"><a href=\"#b\">B</a></li>\n"
    ));
    assert_eq!(html.matches("<li ").count(), 2);
}

#[test]
fn test_python_code_block() {
    let html = convert("```python\nprint(1)\n```");
    assert!(html.starts_with("<pre><code class=\"language-python\""));
    assert!(html.contains("data-lang=\"python\""));
    assert!(html.contains("print"));
    assert!(html.contains(">PYTHON</span>"));
}

#[test]
fn test_code_body_is_escaped_and_unformatted() {
    let html = convert("```html\n<b>**x**</b>\n```");
    assert!(html.contains("&lt;"));
    assert!(html.contains("**x**"));
    assert!(!html.contains("<strong>"));
    assert!(!html.contains("<b>"));
}

#[test]
fn test_paragraphs_split_on_blank_line() {
    assert_eq!(convert("item1\n\nitem2"), "<p>item1</p>\n<p>item2</p>");
}

#[test]
fn test_blank_line_runs_collapse() {
    assert_eq!(normalize("<p>a</p>\n\n\n\n<p>b</p>"), "<p>a</p>\n\n<p>b</p>");
    let html = convert("a\n\n\n\n\nb");
    assert!(!html.contains("\n\n\n"));
}

#[test]
fn test_stats() {
    assert_eq!(
        stats("a b\nc"),
        Stats {
            characters: 5,
            words: 3,
            lines: 2,
            paragraphs: 1,
        }
    );
    assert_eq!(stats(""), Stats::default());
}

#[test]
fn test_malformed_input_never_panics() {
    let inputs = [
        "```",
        "```js\nunterminated",
        "| a |\n|---|\n| b",
        "[broken](",
        "**unbalanced*",
        "> ",
        "-",
        "#",
        "\0",
        "<",
        "\r\r\r",
        "![",
        "`",
    ];
    for input in inputs {
        let html = convert(input);
        assert!(!html.is_empty(), "empty output for {input:?}");
    }
    assert_eq!(convert("\0"), CONVERSION_ERROR_MESSAGE);
}

#[test]
fn test_list_kind_change_splits_lists() {
    assert_eq!(
        convert("- a\n1. b"),
        "<ul><li>a</li></ul>\n<ol><li>b</li></ol>"
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(convert(""), EMPTY_INPUT_MESSAGE);
}

#[test]
fn test_mixed_document() {
    let markdown = "\
# Guide

Intro with a [link](https://example.com) and ![img](a.png).

> quoted *text*

| Name | Value |
|------|-------|
| x    | `1`   |

---

1. one
2. two
";
    let html = Converter::new().with_table_of_contents(false).convert(markdown);
    assert_eq!(
        html,
        "<h1 id=\"guide\">Guide</h1>\n\
         <p>Intro with a <a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">link</a> and <img src=\"a.png\" alt=\"img\" />.</p>\n\
         <blockquote>quoted <em>text</em></blockquote>\n\
         <table><thead><tr><th>Name</th><th>Value</th></tr></thead><tbody><tr><td>x</td><td><code>1</code></td></tr></tbody></table>\n\
         <hr>\n\
         <ol><li>one</li><li>two</li></ol>"
    );
}

#[test]
fn test_full_document() {
    let generated_at = NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .unwrap();
    let meta = DocumentMeta::new(generated_at).with_title("Report");
    let html = Converter::new().convert_full("# Report\n\nBody", &meta);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Report</title>"));
    assert!(html.contains("2025-06-01 12:00:00"));
    assert!(html.contains("<h1 id=\"report\">Report</h1>"));

    let html = convert_full("text", None);
    assert!(html.contains("<title>Markdown Document</title>"));
    assert!(html.contains("<p>text</p>"));
}
