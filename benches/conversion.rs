//! Benchmarks for the chapter conversion pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use ranobe::export::{BlockWalker, Builder, Fb2Builder, Fb2InlineRenderer};
use ranobe::import::{ParseOptions, parse_html_with};
use ranobe::model::Node;

const CHAPTER_HTML: &str = include_str!("../tests/fixtures/chapter.html");

/// A long chapter made of the fixture repeated.
fn sample_html() -> String {
    let body = CHAPTER_HTML
        .trim()
        .trim_start_matches("<div>")
        .trim_end_matches("</div>")
        .replace("<p><img src=\"images/scene.png\"></p>", "");
    format!("<div>{}</div>", body.repeat(200))
}

fn sample_document() -> Node {
    parse_html_with(&sample_html(), ParseOptions::default().with_unwrap_container(true)).unwrap()
}

// ============================================================================
// Import Benchmarks
// ============================================================================

fn bench_parse_html(c: &mut Criterion) {
    let html = sample_html();
    let options = ParseOptions::default().with_unwrap_container(true);

    c.bench_function("parse_html", |b| {
        b.iter(|| parse_html_with(&html, options).unwrap());
    });
}

fn bench_json_decode(c: &mut Criterion) {
    let json = sample_document().to_json_string().unwrap();

    c.bench_function("json_decode", |b| {
        b.iter(|| Node::from_json_str(&json).unwrap());
    });
}

// ============================================================================
// Export Benchmarks
// ============================================================================

fn bench_render_fb2(c: &mut Criterion) {
    let doc = sample_document();
    let renderer = Fb2InlineRenderer::default();

    c.bench_function("render_fb2", |b| {
        b.iter(|| {
            let mut builder = Fb2Builder::new();
            builder.push_chapter("bench");
            BlockWalker::new(&renderer, &mut builder).walk(&doc).unwrap();
            let mut out = Vec::new();
            builder.write_to(&mut out).unwrap();
            out
        });
    });
}

criterion_group!(
    benches,
    // Import
    bench_parse_html,
    bench_json_decode,
    // Export
    bench_render_fb2,
);
criterion_main!(benches);
