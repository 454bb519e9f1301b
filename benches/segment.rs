// Copyright 2026 the Bezseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks of the curve segment operations used on every pointer move.

#![expect(missing_docs, reason = "criterion emits undocumented functions")]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use bezseg::{CurveKind, CurveSegment, Point};

fn segments() -> [CurveSegment; 2] {
    [
        CurveSegment::quad((-1.0, -1.0), (0.0, 2.0), (1.0, -1.0)),
        CurveSegment::cubic((-1.0, -1.0), (0.0, 2.0), (1.0, -1.0), (2.0, 2.0)),
    ]
}

fn bench_project(cc: &mut Criterion) {
    let p = Point::new(0.0, 0.0);
    for seg in segments() {
        cc.bench_with_input(BenchmarkId::new("project", seg.kind()), &seg, |bb, seg| {
            bb.iter(|| black_box(seg).project(black_box(p)));
        });
    }
}

fn bench_split(cc: &mut Criterion) {
    for seg in segments() {
        cc.bench_with_input(BenchmarkId::new("split", seg.kind()), &seg, |bb, seg| {
            bb.iter(|| black_box(seg).split(black_box(0.2), black_box(0.7)));
        });
    }
}

fn bench_arclen_fraction(cc: &mut Criterion) {
    for seg in segments() {
        for fraction in [0.1, 0.5, 0.9] {
            cc.bench_with_input(
                BenchmarkId::new(format!("find t by arclen fraction, {}", seg.kind()), fraction),
                &fraction,
                |bb, fraction| {
                    bb.iter(|| black_box(seg).find_t_by_arclen_fraction(black_box(*fraction)));
                },
            );
        }
    }
}

fn bench_convert(cc: &mut Criterion) {
    let seg = CurveSegment::quad((-1.0, -1.0), (0.0, 2.0), (1.0, -1.0));
    cc.bench_function("convert quadratic to cubic", |bb| {
        bb.iter(|| black_box(seg).convert_to(black_box(CurveKind::Cubic)));
    });
}

criterion_group!(
    benches,
    bench_project,
    bench_split,
    bench_arclen_fraction,
    bench_convert
);
criterion_main!(benches);
