use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use fireworks_kernel::{
    FireworkKind, LaunchSettings, ParticleType, RenderRecord, SimRecord, Simulation,
};
use glam::Vec3;
use std::hint::black_box;

const FRAME: f32 = 1.0 / 60.0;

/// Simulation one second into a full show, with bursts and trails in flight.
fn mid_show() -> Simulation {
    let mut sim = Simulation::new().with_seed(42);
    let settings = LaunchSettings {
        count: 5,
        rocket_life: 0.5,
        burst_particles: 360,
        ..LaunchSettings::default()
    };
    for kind in FireworkKind::ALL {
        sim.launch(kind, &settings);
    }
    for _ in 0..60 {
        sim.step(FRAME).expect("step");
    }
    sim
}

/// Simulation filled with plain stars.
fn full_of_stars(count: usize) -> Simulation {
    let mut sim = Simulation::with_capacity(count).with_seed(7);
    for i in 0..count {
        let velocity = Vec3::new((i % 13) as f32, 20.0, (i % 7) as f32);
        sim.spawn(
            RenderRecord::default(),
            SimRecord::new(ParticleType::StarSimple, velocity, 10.0),
        );
    }
    sim
}

fn step_benchmark(c: &mut Criterion) {
    c.bench_function("step_mid_show", |b| {
        b.iter_batched(
            mid_show,
            |mut sim| black_box(sim.step(black_box(FRAME))),
            BatchSize::LargeInput,
        );
    });

    c.bench_function("step_50k_stars", |b| {
        b.iter_batched(
            || full_of_stars(50_000),
            |mut sim| black_box(sim.step(black_box(FRAME))),
            BatchSize::LargeInput,
        );
    });

    c.bench_function("step_mass_expiry", |b| {
        b.iter_batched(
            || full_of_stars(50_000),
            |mut sim| black_box(sim.step(black_box(20.0))),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, step_benchmark);
criterion_main!(benches);
