//! # Raster Benchmark
//!
//! Measures the drawing primitives on a 320x240 frame:
//! 1. Full-screen clear through the rectangle fill
//! 2. Axis-aligned lines (span fill) vs the same lines through Bresenham
//! 3. Diagonal lines

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use twinscan_core::PixelBuffer;
use twinscan_shared::Rgb565;

const WIDTH: usize = 320;
const HEIGHT: usize = 240;

fn bench_clear(c: &mut Criterion) {
    let mut buffer = PixelBuffer::try_new(WIDTH, HEIGHT).unwrap();
    let mut group = c.benchmark_group("raster_clear");
    group.throughput(criterion::Throughput::Bytes((WIDTH * HEIGHT * 2) as u64));
    group.bench_function("draw_rectangle_full", |b| {
        b.iter(|| {
            buffer.canvas().draw_rectangle(
                black_box(0),
                black_box(0),
                WIDTH as i32,
                HEIGHT as i32,
                Rgb565::BLUE,
            );
        });
    });
    group.finish();
}

fn bench_lines(c: &mut Criterion) {
    let mut buffer = PixelBuffer::try_new(WIDTH, HEIGHT).unwrap();
    let mut group = c.benchmark_group("raster_lines");

    for len in [32, 160, 319] {
        group.bench_with_input(BenchmarkId::new("horizontal_fast", len), &len, |b, &len| {
            b.iter(|| buffer.canvas().draw_line(0, 100, black_box(len), 100, Rgb565::WHITE));
        });
        group.bench_with_input(BenchmarkId::new("horizontal_bresenham", len), &len, |b, &len| {
            b.iter(|| {
                buffer
                    .canvas()
                    .draw_line_bresenham(0, 100, black_box(len), 100, Rgb565::WHITE);
            });
        });
        group.bench_with_input(BenchmarkId::new("diagonal", len), &len, |b, &len| {
            b.iter(|| buffer.canvas().draw_line(0, 0, black_box(len), 239, Rgb565::GREEN));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clear, bench_lines);
criterion_main!(benches);
