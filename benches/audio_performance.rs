//! Audio Performance Benchmarks
//!
//! Checks that one effect instance fits comfortably inside the real-time
//! budget at common sample rates and buffer sizes.
//!
//! ## Real-Time Audio Constraints
//!
//! For real-time audio, we must process a buffer of samples before the next
//! buffer arrives. The time budget is:
//!
//! ```text
//! time_budget = buffer_size / sample_rate
//! ```
//!
//! | Sample Rate | Buffer 64  | Buffer 128 | Buffer 256 | Buffer 512 |
//! |-------------|------------|------------|------------|------------|
//! | 44.1 kHz    | 1.45 ms    | 2.90 ms    | 5.80 ms    | 11.61 ms   |
//! | 48 kHz      | 1.33 ms    | 2.67 ms    | 5.33 ms    | 10.67 ms   |
//! | 96 kHz      | 0.67 ms    | 1.33 ms    | 2.67 ms    | 5.33 ms    |
//! | 192 kHz     | 0.33 ms    | 0.67 ms    | 1.33 ms    | 2.67 ms    |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use modfx::prelude::*;

// ============================================================================
// Sample Rate Constants
// ============================================================================

const SAMPLE_RATES: [u32; 4] = [44_100, 48_000, 96_000, 192_000];
const BUFFER_SIZES: [usize; 4] = [64, 128, 256, 512];

// ============================================================================
// Helper Functions
// ============================================================================

/// A 220 Hz test tone on both channels
fn test_tone(len: usize, sample_rate: u32) -> Vec<f64> {
    (0..len)
        .map(|i| (std::f64::consts::TAU * 220.0 * i as f64 / sample_rate as f64).sin() * 0.5)
        .collect()
}

// ============================================================================
// Building Blocks
// ============================================================================

fn bench_delay_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("building_blocks/delay_line");
    group.throughput(Throughput::Elements(1));

    group.bench_function("write_read_interpolated", |b| {
        let mut line = DelayLine::with_max_delay_ms(250.0, 48_000.0);
        let mut delay = 960.0;
        b.iter(|| {
            delay = if delay > 1400.0 { 960.0 } else { delay + 0.37 };
            let out = line.read_interpolated(black_box(delay));
            line.write(black_box(0.25) + out * 0.1);
            out
        });
    });

    group.finish();
}

fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("building_blocks/oscillator");

    for sample_rate in SAMPLE_RATES {
        let sr_name = format!("{}kHz", sample_rate / 1000);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("step", &sr_name), &sample_rate, |b, &sr| {
            let mut osc = Oscillator::new(1.5, 90.0, sr as f64);
            b.iter(|| black_box(osc.step()));
        });
    }

    group.finish();
}

// ============================================================================
// Per-Sample Benchmarks
// ============================================================================

fn bench_process_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/process_sample");

    for kind in [EffectKind::Chorus, EffectKind::Flanger, EffectKind::Vibrato] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("kind", kind.name()), &kind, |b, &kind| {
            let mut fx = EffectInstance::for_kind(kind, 48_000);
            b.iter(|| black_box(fx.process_sample(black_box(0.3), black_box(-0.2))));
        });
    }

    group.finish();
}

// ============================================================================
// Buffer Processing Benchmarks
// ============================================================================

fn bench_buffer_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_processing");

    for sample_rate in SAMPLE_RATES {
        for buffer_size in BUFFER_SIZES {
            let sr_name = format!("{}kHz", sample_rate / 1000);
            let name = format!("{}/{}samples", sr_name, buffer_size);

            // Calculate time budget for this buffer
            let time_budget_us = (buffer_size as f64 / sample_rate as f64) * 1_000_000.0;

            group.throughput(Throughput::Elements(buffer_size as u64));
            group.bench_with_input(
                BenchmarkId::new("classic", &name),
                &(sample_rate, buffer_size),
                |b, &(sr, buf_size)| {
                    let mut fx = create_from_preset("classic", sr).unwrap();
                    let input = test_tone(buf_size, sr);
                    let mut out_left = vec![0.0; buf_size];
                    let mut out_right = vec![0.0; buf_size];
                    b.iter(|| {
                        fx.process_block(
                            black_box(&input),
                            black_box(&input),
                            &mut out_left,
                            &mut out_right,
                        )
                        .unwrap();
                        black_box(out_left[0])
                    });
                },
            );

            // Print budget info for reference (only visible in verbose mode)
            eprintln!(
                "  {} @ {} samples: budget = {:.2}µs",
                sr_name, buffer_size, time_budget_us
            );
        }
    }

    group.finish();
}

fn bench_in_place_with_remote(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_processing_remote");
    let buffer_size = 256;

    for sample_rate in SAMPLE_RATES {
        let sr_name = format!("{}kHz", sample_rate / 1000);

        group.throughput(Throughput::Elements(buffer_size as u64));
        group.bench_with_input(
            BenchmarkId::new("in_place", &sr_name),
            &sample_rate,
            |b, &sr| {
                let mut fx = create_from_preset("thick", sr).unwrap();
                let mut remote = fx.remote(DEFAULT_QUEUE_CAPACITY);
                let mut block = StereoBlock::new(buffer_size);
                let mut rate = 0.5;
                b.iter(|| {
                    // One automation update per block, as a UI thread would send
                    rate = if rate > 5.0 { 0.5 } else { rate + 0.1 };
                    let _ = remote.update(|p| p.set_rate(rate));
                    block.set_sample(0, 0.5, -0.5);
                    fx.process_stereo_block(&mut block);
                    black_box(block.peak())
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Configuration-Time Benchmarks
// ============================================================================

fn bench_preset_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("presets");
    let table = PresetTable::new().unwrap();

    group.bench_function("create_classic_48kHz", |b| {
        b.iter(|| black_box(table.create(black_box("classic"), 48_000).unwrap()));
    });

    group.bench_function("table_new", |b| {
        b.iter(|| black_box(PresetTable::new().unwrap()));
    });

    group.finish();
}

criterion_group!(building_block_benches, bench_delay_line, bench_oscillator);

criterion_group!(engine_benches, bench_process_sample);

criterion_group!(
    buffer_benches,
    bench_buffer_processing,
    bench_in_place_with_remote,
);

criterion_group!(preset_benches, bench_preset_create);

criterion_main!(
    building_block_benches,
    engine_benches,
    buffer_benches,
    preset_benches
);
