//! Layout and navigation benchmarks.
//!
//! Measures frame layout and the end-of-content clamp on large inputs with
//! long mixed-width lines, in both chop and wrap modes.
//!
//! Run with: cargo bench --bench layout_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minipager::model::Content;
use minipager::state::navigation::{eof_position, window_forward};
use minipager::view_state::layout::layout;
use minipager::view_state::{FrameState, TerminalSize, Viewport};

/// Synthetic content: `n` lines cycling through ASCII, styled and CJK text.
fn content(n: usize) -> Content {
    let lines = (0..n)
        .map(|i| match i % 4 {
            0 => format!("{i} {}", "lorem ipsum dolor sit amet ".repeat(i % 9 + 1)),
            1 => format!("{i} \x1b[31mred\x1b[0m and \x1b[1mbold\x1b[0m text"),
            2 => format!("{i} {}", "这是一段中文文本，".repeat(i % 7 + 1)),
            _ => format!("{i}"),
        })
        .collect();
    Content::new(lines)
}

fn viewport(chop: bool) -> Viewport {
    let size = TerminalSize::new(60, 120).unwrap_or_default();
    Viewport::new(size, chop, 2)
}

fn bench_layout(c: &mut Criterion) {
    let content = content(10_000);
    let mut group = c.benchmark_group("layout_frame");

    for (name, chop) in [("chop", true), ("wrap", false)] {
        let mut vp = viewport(chop);
        vp.set_position((5_000, 0));
        group.bench_with_input(BenchmarkId::from_parameter(name), &vp, |b, vp| {
            b.iter(|| {
                let mut frame = FrameState::default();
                black_box(layout(black_box(&content), vp, &mut frame))
            })
        });
    }

    group.finish();
}

fn bench_eof_clamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("eof_position");

    for size in [1_000, 100_000] {
        let content = content(size);
        let vp = viewport(false);
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| black_box(eof_position(black_box(content), &vp)))
        });
    }

    group.finish();
}

fn bench_page_through(c: &mut Criterion) {
    let content = content(2_000);

    c.bench_function("page_through_wrap", |b| {
        b.iter(|| {
            let mut vp = viewport(false);
            while window_forward(&content, &mut vp, None, false).moved() {}
            black_box(vp.position())
        })
    });
}

criterion_group!(benches, bench_layout, bench_eof_clamp, bench_page_through);
criterion_main!(benches);
