//! Benchmarks for markdown conversion performance.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mdview_renderer::{Converter, Language, highlight_code};

/// Generate markdown content with the given number of sections.
fn generate_markdown(sections: usize, paragraphs_per_section: usize) -> String {
    let mut md = String::with_capacity(sections * (300 + paragraphs_per_section * 120));
    md.push_str("# Document Title\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        for j in 0..paragraphs_per_section {
            md.push_str(&format!(
                "Paragraph {j} of section {i} with **bold**, *italic* and `code`.\n\n"
            ));
        }
        md.push_str("- first item\n- [link](https://example.com)\n\n");
        md.push_str("| Key | Value |\n|-----|-------|\n| a | 1 |\n\n");
        md.push_str("```js\nconst total = items.reduce((a, b) => a + b, 0); // sum\n```\n\n");
    }
    md
}

fn bench_convert_simple(c: &mut Criterion) {
    let converter = Converter::new();

    c.bench_function("convert_simple_markdown", |b| {
        b.iter(|| converter.convert(black_box("# Hello\n\nSimple content.")));
    });
}

fn bench_convert_varying_sizes(c: &mut Criterion) {
    let converter = Converter::new();
    let mut group = c.benchmark_group("convert_by_size");

    for (sections, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let markdown = generate_markdown(sections, paragraphs);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("markdown", format!("{sections}s_{paragraphs}p")),
            &markdown,
            |b, md| b.iter(|| converter.convert(md)),
        );
    }

    group.finish();
}

fn bench_highlight_code(c: &mut Criterion) {
    let source = "function add(a, b) {\n  // add numbers\n  return a + b * 2.5;\n}\n".repeat(50);

    c.bench_function("highlight_javascript_200_lines", |b| {
        b.iter(|| highlight_code(black_box(&source), Language::EcmaScript));
    });
}

criterion_group!(
    benches,
    bench_convert_simple,
    bench_convert_varying_sizes,
    bench_highlight_code
);
criterion_main!(benches);
