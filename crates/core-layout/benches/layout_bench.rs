use std::hint::black_box;
use std::ops::Range;

use core_fold::FoldingStorage;
use core_layout::{FoldingTypesetter, LayoutSettings};
use criterion::{Criterion, criterion_group, criterion_main};

/// Document of `blocks` small functions plus the char range of each body.
fn sample_document(blocks: usize) -> (String, Vec<Range<usize>>) {
    let mut text = String::new();
    let mut bodies = Vec::with_capacity(blocks);
    for i in 0..blocks {
        let header = format!("fn item_{i}() {{");
        let body = format!("\n    let x = {i};\n    x * 2");
        let start = text.chars().count() + header.chars().count();
        bodies.push(start..start + body.chars().count());
        text.push_str(&header);
        text.push_str(&body);
        text.push_str("\n}\n");
    }
    (text, bodies)
}

fn bench_layout(c: &mut Criterion) {
    let (text, bodies) = sample_document(200);

    c.bench_function("layout_unfolded", |b| {
        let mut storage = FoldingStorage::from_str(&text);
        let mut typesetter = FoldingTypesetter::new(LayoutSettings::default());
        b.iter(|| black_box(typesetter.layout_document(&mut storage).ok()))
    });

    c.bench_function("layout_every_block_folded", |b| {
        let mut storage = FoldingStorage::from_str(&text);
        for body in &bodies {
            storage.fold(body.clone()).unwrap();
        }
        let mut typesetter = FoldingTypesetter::new(LayoutSettings::default());
        b.iter(|| black_box(typesetter.layout_document(&mut storage).ok()))
    });
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
