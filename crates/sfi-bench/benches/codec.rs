//! Encode and decode benchmarks.
//!
//! The shipment catalog keeps vectors under 64 bits; the wide catalogs push
//! them into hundreds of bits to measure big-integer cost.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sfi::SfiEngine;
use sfi_bench::{full_attributes, wide_catalog};

// ============================================================================
// Encode
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let engine = SfiEngine::shipments().expect("shipment catalog");
    let attrs = full_attributes(engine.assignment());
    group.bench_function("shipments", |b| {
        b.iter(|| black_box(engine.encode(black_box(&attrs))));
    });

    for groups in [10, 40, 100] {
        let engine = SfiEngine::for_catalog(wide_catalog(groups, 4).expect("wide catalog"))
            .expect("wide assignment");
        let attrs = full_attributes(engine.assignment());

        group.bench_with_input(BenchmarkId::new("wide", groups), &attrs, |b, attrs| {
            b.iter(|| black_box(engine.encode(black_box(attrs))));
        });
    }

    group.finish();
}

// ============================================================================
// Decode
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let engine = SfiEngine::shipments().expect("shipment catalog");
    let vector = engine
        .encode(&full_attributes(engine.assignment()))
        .expect("encode")
        .vector;
    group.bench_function("shipments", |b| {
        b.iter(|| black_box(engine.decode(black_box(&vector))));
    });

    for groups in [10, 40, 100] {
        let engine = SfiEngine::for_catalog(wide_catalog(groups, 4).expect("wide catalog"))
            .expect("wide assignment");
        let vector = engine
            .encode(&full_attributes(engine.assignment()))
            .expect("encode")
            .vector;

        group.bench_with_input(BenchmarkId::new("wide", groups), &vector, |b, vector| {
            b.iter(|| black_box(engine.decode(black_box(vector))));
        });
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(codec_benches, bench_encode, bench_decode);

criterion_main!(codec_benches);
