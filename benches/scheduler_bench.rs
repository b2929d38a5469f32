use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aurora_engine::channel_view::AccessPattern;
use aurora_engine::node::PrepareContext;
use aurora_engine::scheduler::{build_sine_gain_demo, Scheduler};

fn bench_sine_gain_tick(c: &mut Criterion) {
    let mut scheduler = Scheduler::new();
    build_sine_gain_demo(&mut scheduler, 540.0, 0.5);
    scheduler
        .prepare(PrepareContext {
            n_channels: 2,
            block_size: 256,
            sample_rate: 44100.0,
            access_pattern: AccessPattern::Interleaved,
        })
        .unwrap();

    c.bench_function("scheduler_sine_gain_tick_256", |b| {
        b.iter(|| {
            scheduler.process().unwrap();
            let output = scheduler.get_output_buffer().unwrap();
            black_box(output.read_sample(0, 0));
        });
    });
}

fn bench_prepare(c: &mut Criterion) {
    c.bench_function("scheduler_prepare_sine_gain", |b| {
        b.iter(|| {
            let mut scheduler = Scheduler::new();
            build_sine_gain_demo(&mut scheduler, 540.0, 0.5);
            scheduler
                .prepare(PrepareContext {
                    n_channels: 2,
                    block_size: 256,
                    sample_rate: 44100.0,
                    access_pattern: AccessPattern::Interleaved,
                })
                .unwrap();
            black_box(&scheduler);
        });
    });
}

criterion_group!(benches, bench_sine_gain_tick, bench_prepare);
criterion_main!(benches);
