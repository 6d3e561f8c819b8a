use std::hint::black_box;
use std::time::{Duration, Instant};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use proctop::system::platform::CpuTimes;
use proctop::system::process::{ProcessRecord, build_rows};
use proctop::system::sampler::{CpuSampler, CpuTimeSample};

fn make_sample(base: Instant, offset_ms: u64, cpu_ms: u64) -> CpuTimeSample {
    CpuTimeSample {
        times: CpuTimes {
            kernel: Duration::from_millis(cpu_ms / 2),
            user: Duration::from_millis(cpu_ms - cpu_ms / 2),
            created: Some(Duration::from_secs(1)),
        },
        taken_at: base + Duration::from_millis(offset_ms),
    }
}

fn bench_observe_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler_observe_500_1000_2000");
    let base = Instant::now();

    for size in [500usize, 1000, 2000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            // Seed the history so every observation computes a real delta.
            let mut sampler = CpuSampler::new();
            sampler.begin_cycle();
            for pid in 0..size as u32 {
                sampler.observe(pid, make_sample(base, 0, 0), 8);
            }
            sampler.end_cycle();

            let mut cycle = 0u64;
            b.iter(|| {
                cycle += 1;
                let offset = cycle * 1000;
                sampler.begin_cycle();
                for pid in 0..size as u32 {
                    let sample = make_sample(base, offset, cycle * 10);
                    black_box(sampler.observe(black_box(pid), sample, 8));
                }
                sampler.end_cycle();
            })
        });
    }

    group.finish();
}

fn bench_build_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_rows_2000");
    let base = Instant::now();
    let size = 2000usize;

    let records: Vec<ProcessRecord> = (0..size as u32)
        .map(|pid| ProcessRecord {
            pid,
            name: format!("proc_{pid}"),
        })
        .collect();

    group.bench_function(BenchmarkId::from_parameter(size), |b| {
        let mut sampler = CpuSampler::new();
        let mut cycle = 0u64;
        b.iter(|| {
            cycle += 1;
            let offset = cycle * 1000;
            let rows = build_rows(
                black_box(records.clone()),
                |pid| Some((make_sample(base, offset, cycle * 5), pid as u64 * 1024)),
                &mut sampler,
                8,
            );
            black_box(rows);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_observe_cycle, bench_build_rows);
criterion_main!(benches);
