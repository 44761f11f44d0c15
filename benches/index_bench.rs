// benches/index_bench.rs
//! Benchmarks for slug assignment, index building and block normalization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use notion_blog_index::{normalize_block, slugify, BlogIndex, PostRecord, RawBlock};
use serde_json::json;

fn sample_titles(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("Post #{}: Shipping Rust to production, part {}!", i, i % 7))
        .collect()
}

fn sample_blocks(count: usize) -> Vec<RawBlock> {
    (0..count)
        .map(|i| {
            let value = match i % 4 {
                0 => json!({
                    "id": format!("b{}", i),
                    "type": "paragraph",
                    "paragraph": { "rich_text": [
                        { "type": "text", "plain_text": "Some text " },
                        { "type": "text", "plain_text": "with two runs" }
                    ] }
                }),
                1 => json!({
                    "id": format!("b{}", i),
                    "type": "code",
                    "code": { "rich_text": [{ "type": "text", "plain_text": "let x = 1;" }], "language": "rust" }
                }),
                2 => json!({
                    "id": format!("b{}", i),
                    "type": "image",
                    "image": { "type": "external", "external": { "url": "https://example.com/i.png" } }
                }),
                _ => json!({ "id": format!("b{}", i), "type": "divider", "divider": {} }),
            };
            serde_json::from_value(value).expect("bench block parses")
        })
        .collect()
}

fn bench_slugify(c: &mut Criterion) {
    let titles = sample_titles(1_000);
    c.bench_function("slugify_1000_titles", |b| {
        b.iter(|| {
            for title in &titles {
                black_box(slugify(black_box(title)));
            }
        })
    });
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    for size in [100usize, 1_000] {
        let titles = sample_titles(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &titles, |b, titles| {
            b.iter(|| {
                let index: BlogIndex = titles
                    .iter()
                    .enumerate()
                    .map(|(i, title)| PostRecord::new(format!("id-{}", i), title.as_str()))
                    .collect();
                black_box(index)
            })
        });
    }
    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let blocks = sample_blocks(100);
    c.bench_function("normalize_100_blocks", |b| {
        b.iter(|| {
            let nodes: Vec<_> = blocks.iter().map(normalize_block).collect();
            black_box(nodes)
        })
    });
}

criterion_group!(benches, bench_slugify, bench_index_build, bench_normalize);
criterion_main!(benches);
