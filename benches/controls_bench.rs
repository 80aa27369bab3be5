//! Hot per-frame math: damped smoothing of a camera axis, the orbit
//! controller's full update, and cube face remapping used when checking
//! environment seams on the CPU.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use stagecam::camera::smooth_controls::SmoothControls;
use stagecam::environment::face::{remap, texel_uv};
use stagecam::util::damper::Damper;

fn damper_benchmark(c: &mut Criterion) {
    c.bench_function("damper_converge_60_frames", |b| {
        b.iter(|| {
            let mut damper = Damper::new(50.0);
            let mut x = 0.0;
            for _ in 0..60 {
                x = damper.update(x, black_box(1.0), 16.6, 1.0);
            }
            black_box(x)
        });
    });
}

fn controller_benchmark(c: &mut Criterion) {
    c.bench_function("smooth_controls_update", |b| {
        let mut controls = SmoothControls::default();
        let mut time = 0.0;
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let theta = if flip { 1.0 } else { -1.0 };
            let _ = controls.set_orbit(theta, 1.2, 3.0);
            time += 16.6;
            controls.update(time, 16.6);
            black_box(controls.camera_spherical())
        });
    });
}

fn face_remap_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("face_remap");
    for size in [16u32, 64] {
        group.bench_function(format!("border_ring_{size}"), |b| {
            b.iter(|| {
                let mut hits = 0u32;
                for face in 0..6 {
                    for i in 0..size {
                        let edge = texel_uv(i, 0, size) - Vec2::new(0.0, 2.0 / size as f32);
                        let (target, _) = remap(face, black_box(edge));
                        hits += u32::from(target != face);
                    }
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    damper_benchmark,
    controller_benchmark,
    face_remap_benchmark
);
criterion_main!(benches);
