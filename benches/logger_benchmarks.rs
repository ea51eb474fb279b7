//! Criterion benchmarks for rust_log_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_facade::prelude::*;
use rust_log_facade::{
    fields, update_default_logger, Encoder, LogEntry, TimestampFormat, WriterSink,
};
use std::io;
use std::sync::Arc;

fn discarding_logger(level: LogLevel, encoding: &str, caller: bool) -> Arc<dyn Logger> {
    new_logger(
        Config::builder()
            .level(level)
            .sink(WriterSink::new(io::sink()))
            .encoding(encoding)
            .caller(caller)
            .build(),
    )
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("engine", |b| {
        b.iter(|| black_box(discarding_logger(LogLevel::Debug, "json", false)));
    });

    group.bench_function("noop", |b| {
        b.iter(|| black_box(NoopLogger::new()));
    });

    group.finish();
}

// ============================================================================
// Call Family Benchmarks
// ============================================================================

fn bench_call_families(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_families");
    group.throughput(Throughput::Elements(1));

    let logger = discarding_logger(LogLevel::Debug, "json", false);

    group.bench_function("values", |b| {
        b.iter(|| logger.info(&[&black_box("user"), &black_box(42)]));
    });

    group.bench_function("formatted", |b| {
        b.iter(|| logger.infof(format_args!("user {} logged in", black_box(42))));
    });

    group.bench_function("structured", |b| {
        b.iter(|| logger.infot("login", fields! { "user" => black_box(42), "ok" => true }));
    });

    group.finish();
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    group.throughput(Throughput::Elements(1));

    let entry = LogEntry::new(LogLevel::Info, "request served")
        .with_fields(fields! { "status" => 200, "path" => "/health", "ms" => 1.5 });

    for name in ["json", "console"] {
        let encoder = Encoder::new(&Encoding::from(name), TimestampFormat::default(), false);
        group.bench_function(name, |b| b.iter(|| black_box(encoder.encode(&entry))));
    }

    group.bench_function("with_caller", |b| {
        let logger = discarding_logger(LogLevel::Debug, "json", true);
        b.iter(|| logger.warn(&[&"located"]));
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = discarding_logger(LogLevel::Error, "json", false);

    group.bench_function("filtered", |b| {
        b.iter(|| logger.debugt("dropped", fields! { "n" => 1 }));
    });

    group.bench_function("passed", |b| {
        b.iter(|| logger.error(&[&"kept"]));
    });

    group.bench_function("noop", |b| {
        let noop = NoopLogger::new();
        b.iter(|| noop.error(&[&"discarded"]));
    });

    group.finish();
}

// ============================================================================
// Default Logger Benchmarks
// ============================================================================

fn bench_default_logger(c: &mut Criterion) {
    let mut group = c.benchmark_group("default_logger");
    group.throughput(Throughput::Elements(1));

    update_default_logger(discarding_logger(LogLevel::Debug, "json", false));

    group.bench_function("forwarded", |b| {
        b.iter(|| rust_log_facade::infof(format_args!("tick {}", black_box(1))));
    });

    group.finish();
}

// ============================================================================
// Concurrency Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");
    group.throughput(Throughput::Elements(400));

    let logger = discarding_logger(LogLevel::Debug, "json", false);

    group.bench_function("4_threads", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        for i in 0..100 {
                            logger.infof(format_args!("message {}", i));
                        }
                    })
                })
                .collect();

            for handle in handles {
                let _ = handle.join();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_call_families,
    bench_encoding,
    bench_level_filtering,
    bench_default_logger,
    bench_concurrent_logging,
);
criterion_main!(benches);
