use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec3;

use broadcast_globe::globe::animation::{animate, phase_seed};
use broadcast_globe::globe::projection::{project, GeoPoint, MARKER_RADIUS};

fn bench_projection(c: &mut Criterion) {
    let points: Vec<GeoPoint> = (0..10_000)
        .map(|i| GeoPoint::new((i % 181) as f64 - 90.0, (i % 361) as f64 - 180.0))
        .collect();

    c.bench_function("project_10k", |b| {
        b.iter(|| {
            for p in &points {
                black_box(project(black_box(*p), MARKER_RADIUS));
            }
        })
    });
}

fn bench_frame_update(c: &mut Criterion) {
    let markers: Vec<(DVec3, f64)> = (0..10_000)
        .map(|i| {
            let point = GeoPoint::new((i % 181) as f64 - 90.0, (i % 361) as f64 - 180.0);
            (
                project(point, MARKER_RADIUS),
                phase_seed(&format!("station-{i}")),
            )
        })
        .collect();

    c.bench_function("animate_10k", |b| {
        let mut t = 0.0;
        b.iter(|| {
            t += 0.016;
            for &(base, phase) in &markers {
                black_box(animate(base, t, phase));
            }
        })
    });
}

criterion_group!(benches, bench_projection, bench_frame_update);
criterion_main!(benches);
