/*!
 * Engine Benchmarks
 *
 * Full runs per policy over tables of increasing size
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sched_sim::process::scheduler::Engine;
use sched_sim::{LogicalClock, ProcessSpec, ProcessTable, SchedulingPolicy};

fn table(size: u32) -> ProcessTable {
    let mut table = ProcessTable::new();
    for i in 0..size {
        table.create(
            ProcessSpec::new(format!("p{}", i))
                .with_demand(1 + i % 7)
                .with_priority((i % 5) as i32 + 1),
            0,
        );
    }
    table
}

fn bench_policies(c: &mut Criterion) {
    for policy in SchedulingPolicy::ALL {
        let mut group = c.benchmark_group(format!("run_{}", policy));

        for size in [8u32, 64, 256] {
            let template = table(size);
            group.bench_with_input(BenchmarkId::from_parameter(size), &template, |b, template| {
                b.iter(|| {
                    let mut t = template.clone();
                    let report = Engine::new()
                        .run(&mut t, policy, &LogicalClock::new())
                        .unwrap();
                    black_box(report.cycles())
                });
            });
        }

        group.finish();
    }
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    let template = table(256);

    for policy in SchedulingPolicy::ALL {
        group.bench_function(policy.as_str(), |b| {
            b.iter(|| {
                let mut t = template.clone();
                black_box(policy.select(&mut t))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_policies, bench_selection);
criterion_main!(benches);
