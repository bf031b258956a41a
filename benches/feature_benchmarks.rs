use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use orderbook_features::{
    compute_depth, compute_expected_slippage, compute_imbalance, compute_orderbook_bundle,
    compute_simple_market_impact, Decimal, OrderBookSnapshot, PriceLevel, Side,
};
use std::sync::Arc;

/// Builds a book with `depth` levels per side around a mid of 100.5.
fn build_snapshot(depth: i64) -> OrderBookSnapshot {
    let bids = (0..depth)
        .map(|i| PriceLevel::new(Decimal::new(10_000 - i, 2), Decimal::from(10 + i % 7)))
        .collect();
    let asks = (0..depth)
        .map(|i| PriceLevel::new(Decimal::new(10_100 + i, 2), Decimal::from(9 + i % 5)))
        .collect();
    OrderBookSnapshot::new(bids, asks, chrono::Utc::now())
}

/// Benchmark depth and imbalance over the standard windows.
fn benchmark_depth_and_imbalance(criterion: &mut Criterion) {
    let mut benchmark_group = criterion.benchmark_group("depth_and_imbalance");
    let snapshot = build_snapshot(100);

    for levels in [5, 10, 50] {
        benchmark_group.bench_with_input(
            BenchmarkId::new("compute_depth", levels),
            &levels,
            |bencher, &levels| {
                bencher.iter(|| black_box(compute_depth(&snapshot, levels)));
            },
        );
        benchmark_group.bench_with_input(
            BenchmarkId::new("compute_imbalance", levels),
            &levels,
            |bencher, &levels| {
                bencher.iter(|| black_box(compute_imbalance(&snapshot, levels)));
            },
        );
    }

    benchmark_group.finish();
}

/// Benchmark the slippage walk as the order grows to consume more of the book.
fn benchmark_slippage_walk(criterion: &mut Criterion) {
    let mut benchmark_group = criterion.benchmark_group("slippage_walk");
    let snapshot = build_snapshot(100);

    for notional in [100, 1_000, 10_000, 100_000] {
        benchmark_group.throughput(Throughput::Elements(1));
        let notional_decimal = Decimal::from(notional);

        benchmark_group.bench_with_input(
            BenchmarkId::new("buy", notional),
            &notional_decimal,
            |bencher, &notional| {
                bencher.iter(|| black_box(compute_expected_slippage(&snapshot, Side::Buy, notional, 20)));
            },
        );
        benchmark_group.bench_with_input(
            BenchmarkId::new("market_impact", notional),
            &notional_decimal,
            |bencher, &notional| {
                bencher.iter(|| black_box(compute_simple_market_impact(&snapshot, notional, 20)));
            },
        );
    }

    benchmark_group.finish();
}

/// Benchmark the full bundle at various book sizes.
fn benchmark_bundle(criterion: &mut Criterion) {
    let mut benchmark_group = criterion.benchmark_group("bundle");

    for book_size in [10, 100, 1_000, 10_000] {
        benchmark_group.throughput(Throughput::Elements(1));
        let snapshot = build_snapshot(book_size);

        benchmark_group.bench_with_input(
            BenchmarkId::new("compute_orderbook_bundle", book_size),
            &snapshot,
            |bencher, snapshot| {
                bencher.iter(|| black_box(compute_orderbook_bundle(snapshot, Decimal::from(1000))));
            },
        );
    }

    benchmark_group.finish();
}

/// Benchmark computing bundles from one shared snapshot on several threads.
fn benchmark_concurrent_bundles(criterion: &mut Criterion) {
    let mut benchmark_group = criterion.benchmark_group("concurrent_bundles");
    let snapshot_arc = Arc::new(build_snapshot(100));

    for threads_count in [1, 2, 4, 8] {
        benchmark_group.bench_with_input(
            BenchmarkId::new("concurrent_bundles", threads_count),
            &threads_count,
            |bencher, &thread_count| {
                bencher.iter(|| {
                    let mut thread_handles = vec![];

                    for _ in 0..thread_count {
                        let snapshot_clone = Arc::clone(&snapshot_arc);
                        thread_handles.push(std::thread::spawn(move || {
                            for _ in 0..100 {
                                let bundle = compute_orderbook_bundle(&snapshot_clone, Decimal::from(1000));
                                black_box(bundle);
                            }
                        }));
                    }

                    for handle in thread_handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    benchmark_group.finish();
}

criterion_group!(
    benches,
    benchmark_depth_and_imbalance,
    benchmark_slippage_walk,
    benchmark_bundle,
    benchmark_concurrent_bundles
);
criterion_main!(benches);
