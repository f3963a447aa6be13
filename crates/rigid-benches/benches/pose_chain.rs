// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rigid_benches::pose_chain;
use rigid_frames::chain::{compose_applied_after, compose_left_to_right, transform_point_applied_after};
use rigid_frames::Vec3;
use std::{hint::black_box, time::Duration};

fn bench_chain_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("pose_chain");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));
    group.noise_threshold(0.02);
    let point = Vec3::new(0.1, 0.2, 0.3);
    for &n in &[4u32, 16, 64, 256] {
        let outer_to_inner = pose_chain(n);
        let inner_to_outer: Vec<_> = outer_to_inner.iter().rev().copied().collect();
        group.throughput(Throughput::Elements(u64::from(n)));

        group.bench_with_input(BenchmarkId::new("compose_left_to_right", n), &n, |b, _| {
            b.iter(|| black_box(compose_left_to_right(black_box(&outer_to_inner))));
        });
        group.bench_with_input(BenchmarkId::new("compose_applied_after", n), &n, |b, _| {
            b.iter(|| black_box(compose_applied_after(black_box(&inner_to_outer))));
        });
        // Composite pose once, then one point transform.
        group.bench_with_input(BenchmarkId::new("point_via_composite", n), &n, |b, _| {
            b.iter(|| {
                let composite = compose_left_to_right(black_box(&outer_to_inner));
                black_box(composite.transform_point_local_to_parent(&point))
            });
        });
        // One point pushed outward frame by frame.
        group.bench_with_input(BenchmarkId::new("point_frame_by_frame", n), &n, |b, _| {
            b.iter(|| black_box(transform_point_applied_after(black_box(point), &inner_to_outer)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain_orders);
criterion_main!(benches);
