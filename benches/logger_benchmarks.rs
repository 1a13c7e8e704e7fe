//! Criterion benchmarks for xlog

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io;
use xlog::prelude::*;

fn discard_logger(level: LogLevel) -> Logger {
    Logger::builder()
        .min_level(level)
        .sink(WriterSink::new(io::sink()))
        .build()
}

// ============================================================================
// Call Style Benchmarks
// ============================================================================

fn bench_call_styles(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_styles");
    group.throughput(Throughput::Elements(1));

    let logger = discard_logger(LogLevel::Debug);
    let sugar = logger.sugar();

    group.bench_function("typed", |b| {
        b.iter(|| {
            logger.info(
                black_box("request"),
                &[field::string("path", "/health"), field::int("status", 200)],
            );
        });
    });

    group.bench_function("variadic", |b| {
        b.iter(|| {
            sugar.info(&[&"request", &black_box("/health"), &200]);
        });
    });

    group.bench_function("format", |b| {
        b.iter(|| {
            sugar.infof(format_args!("request {} -> {}", black_box("/health"), 200));
        });
    });

    group.bench_function("keyvalue", |b| {
        b.iter(|| {
            sugar.infow(
                black_box("request"),
                &["path".into(), "/health".into(), "status".into(), 200i64.into()],
            );
        });
    });

    group.finish();
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_filtered(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered");
    group.throughput(Throughput::Elements(1));

    let logger = discard_logger(LogLevel::Error);
    let sugar = logger.sugar();

    group.bench_function("typed_below_threshold", |b| {
        b.iter(|| logger.debug(black_box("dropped"), &[field::int("n", 1)]));
    });

    group.bench_function("format_below_threshold", |b| {
        b.iter(|| sugar.debugf(format_args!("dropped {}", black_box(1))));
    });

    group.finish();
}

// ============================================================================
// Encoder Benchmarks
// ============================================================================

fn bench_encoders(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoders");

    let entry = LogEntry::new(LogLevel::Info, "encode me").with_fields(vec![
        field::string("user", "ada"),
        field::int("attempt", 3),
        field::float("latency_ms", 12.5),
    ]);

    for (name, encoder) in [
        ("console", Encoder::console(EncoderConfig::iso8601())),
        ("json", Encoder::json(EncoderConfig::iso8601())),
        ("json_epoch", Encoder::json(EncoderConfig::production())),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &encoder, |b, encoder| {
            b.iter(|| black_box(encoder.encode(&entry)));
        });
    }

    group.finish();
}

// ============================================================================
// Rotating File Benchmarks
// ============================================================================

fn bench_rotating_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotating_file");
    group.throughput(Throughput::Elements(1));

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let policy = RotationPolicy::new()
        .with_max_size(4 * 1024 * 1024)
        .with_max_backups(2)
        .with_compression(false);
    let logger = Logger::builder()
        .sink(RotatingFileSink::with_policy(dir.path().join("bench.log"), policy))
        .build();

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("to disk"), &[field::int("n", 42)]));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_call_styles,
    bench_filtered,
    bench_encoders,
    bench_rotating_file
);
criterion_main!(benches);
