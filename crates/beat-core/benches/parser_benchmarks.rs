//! Parser throughput benchmarks
//!
//! Scripts are built by repeating the generated episode skeleton, so the
//! grammar mix matches what authors actually write.

use beat_core::{
    generate_script_skeleton, parse_script, parser::compile, tokenizer::classify_line, EventSpec,
    ParseOptions, SkeletonOptions,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Concatenate `episodes` skeletons into one script
fn synthetic_script(episodes: usize) -> String {
    let skeleton = generate_script_skeleton(&EventSpec::default(), &SkeletonOptions::default());
    vec![skeleton; episodes].join("\n\n")
}

/// Full pipeline at several script sizes
fn bench_parse_script(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_script");
    let options = ParseOptions::default();

    for episodes in [1, 10, 50] {
        let script = synthetic_script(episodes);
        group.throughput(Throughput::Bytes(script.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(episodes), &script, |b, script| {
            b.iter(|| parse_script(black_box(script), &options));
        });
    }

    group.finish();
}

/// Segmentation and content parsing without diagnostics or assembly
fn bench_compile(c: &mut Criterion) {
    let script = synthetic_script(10);
    c.bench_function("compile_10_episodes", |b| {
        b.iter(|| compile(black_box(&script)));
    });
}

/// Line classifier on each grammar branch
fn bench_classify_line(c: &mut Criterion) {
    let lines = [
        "Lala: \"Bestie... I look like money.\"",
        "(poses gracefully)",
        "[UI:TYPE Username \"JustAWomanInHerPrime\"]",
        "[MAIL: type=invite from=\"Maison Rose\" prestige=8 cost=150coins]",
        "Plain narration that falls through every grammar.",
    ];

    c.bench_function("classify_line", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(classify_line(black_box(line)));
            }
        });
    });
}

criterion_group!(benches, bench_parse_script, bench_compile, bench_classify_line);
criterion_main!(benches);
