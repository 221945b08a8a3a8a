//! Benchmarks for the diff filter scan.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kdm_update::core::{filter_diff, filter_tracked};

/// Generate a synthetic unified diff with `files` file blocks of
/// `lines_per_file` content lines each. Every tenth block touches the
/// tracked agent.go path.
fn generate_diff(files: usize, lines_per_file: usize) -> Vec<String> {
    let mut diff = Vec::with_capacity(files * (lines_per_file + 3));
    for i in 0..files {
        let name = if i % 10 == 0 {
            "pkg/cli/cmds/agent.go".to_string()
        } else {
            format!("pkg/other/file{i}.go")
        };
        diff.push(format!("diff --git a/{name} b/{name}"));
        diff.push(format!("--- a/{name}"));
        diff.push(format!("+++ b/{name}"));
        for j in 0..lines_per_file {
            let prefix = match j % 3 {
                0 => '+',
                1 => '-',
                _ => ' ',
            };
            diff.push(format!("{prefix}\tline number {j}"));
        }
    }
    diff
}

fn tracked() -> Vec<String> {
    vec![
        "pkg/cli/cmds/agent.go".to_string(),
        "pkg/cli/cmds/server.go".to_string(),
    ]
}

fn bench_filter_tracked(c: &mut Criterion) {
    let tracked = tracked();
    let mut group = c.benchmark_group("filter_tracked");

    for files in [10, 100, 1_000] {
        let diff = generate_diff(files, 50);
        group.throughput(Throughput::Elements(diff.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(files), &diff, |b, diff| {
            b.iter(|| {
                black_box(filter_tracked(
                    diff.iter().map(String::as_str),
                    black_box(&tracked),
                ))
            });
        });
    }

    group.finish();
}

fn bench_filter_diff(c: &mut Criterion) {
    let tracked = tracked();
    let mut group = c.benchmark_group("filter_diff");

    for files in [10, 100, 1_000] {
        let diff = generate_diff(files, 50);
        group.throughput(Throughput::Elements(diff.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(files), &diff, |b, diff| {
            b.iter(|| {
                black_box(filter_diff(
                    diff.iter().map(String::as_str),
                    black_box(&tracked),
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter_tracked, bench_filter_diff);
criterion_main!(benches);
