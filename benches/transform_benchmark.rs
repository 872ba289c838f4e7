//! Benchmarks for pagemd transformation and rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure the pipeline on synthetic page data.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagemd::{BBox, Line, Options, PageText, Span};

/// Creates a synthetic document with headings, paragraphs, a list, and a
/// table on every page.
fn create_test_pages(page_count: usize) -> Vec<PageText> {
    (0..page_count)
        .map(|index| {
            let mut lines = vec![
                text_line("Running Header", 10.0, 72.0, 40.0),
                text_line(&format!("Section {}", index + 1), 18.0, 72.0, 80.0),
            ];

            for p in 0..8 {
                lines.push(text_line(
                    "Body text with enough characters to anchor the modal font size in the histogram.",
                    11.0,
                    72.0,
                    120.0 + p as f32 * 14.0,
                ));
            }

            for (i, item) in ["first entry", "second entry", "third entry"].iter().enumerate() {
                lines.push(text_line(
                    &format!("• {item}"),
                    11.0,
                    72.0,
                    260.0 + i as f32 * 14.0,
                ));
            }

            for row in 0..4 {
                lines.push(Line::new(vec![
                    span("name", 72.0, 320.0 + row as f32 * 14.0),
                    span("value", 220.0, 320.0 + row as f32 * 14.0),
                    span("unit", 370.0, 320.0 + row as f32 * 14.0),
                ]));
            }

            lines.push(text_line(
                &format!("Page {}", index + 1),
                10.0,
                72.0,
                760.0,
            ));

            PageText::new(index, lines)
        })
        .collect()
}

fn span(text: &str, x: f32, y: f32) -> Span {
    Span::new(text, 11.0).at(BBox::new(x, y, x + 60.0, y + 11.0))
}

fn text_line(text: &str, size: f32, x: f32, y: f32) -> Line {
    Line::new(vec![
        Span::new(text, size).at(BBox::new(x, y, x + 400.0, y + size))
    ])
}

/// Benchmark the full transform at various page counts.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    for page_count in [1, 10, 50].iter() {
        let pages = create_test_pages(*page_count);
        let options = Options::default().with_defragment(true);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| pagemd::transform(black_box(pages.clone()), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark rendering separately from transformation.
fn bench_render(c: &mut Criterion) {
    let pages = create_test_pages(20);
    let options = Options::default();
    let doc = pagemd::transform(pages, &options).unwrap();

    c.bench_function("render_20_pages", |b| {
        b.iter(|| pagemd::render::render(black_box(&doc), &options));
    });
}

/// Benchmark the end-to-end convenience entry point.
fn bench_to_markdown(c: &mut Criterion) {
    let pages = create_test_pages(10);
    let options = Options::default();

    c.bench_function("to_markdown_10_pages", |b| {
        b.iter(|| pagemd::to_markdown(black_box(pages.clone()), &options).unwrap());
    });
}

criterion_group!(benches, bench_transform, bench_render, bench_to_markdown);
criterion_main!(benches);
