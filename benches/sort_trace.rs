use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::prelude::SliceRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use algotrace::binary_search::binary_search;
use algotrace::merge_sort::merge_sort;
use algotrace::quick_sort::quick_sort;
use algotrace::{record, Algorithm, NullSink, PivotStrategy, TraceConfig};

fn shuffled(n: i64) -> Vec<i64> {
    let mut data: Vec<i64> = (0..n).collect();
    data.shuffle(&mut StdRng::seed_from_u64(12345));
    data
}

fn benchmark_untraced(c: &mut Criterion) {
    let data = shuffled(1 << 16);
    c.bench_function("Merge sort 64Ki, no trace", |b| {
        b.iter_batched_ref(|| data.clone(), |d| merge_sort(black_box(d), &mut NullSink), BatchSize::LargeInput)
    });
    c.bench_function("Quick sort 64Ki, no trace", |b| {
        b.iter_batched_ref(
            || data.clone(),
            |d| quick_sort(black_box(d), PivotStrategy::Random { seed: 12345 }, &mut NullSink),
            BatchSize::LargeInput,
        )
    });

    let mut sorted = data.clone();
    sorted.sort_unstable();
    c.bench_function("Binary search 64Ki, no trace", |b| {
        b.iter(|| black_box(binary_search(black_box(&sorted), 4321, &mut NullSink)))
    });
}

fn benchmark_recorded(c: &mut Criterion) {
    // every step copies the array, so recording is quadratic in memory
    let data = shuffled(512);
    for algorithm in [Algorithm::MergeSort, Algorithm::QuickSort] {
        let config = TraceConfig {
            algorithm,
            ..TraceConfig::default()
        };
        c.bench_function(&format!("{algorithm} 512, recorded"), |b| {
            b.iter(|| black_box(record(&config, black_box(&data))))
        });
    }
}

criterion_group!(name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_untraced, benchmark_recorded);
criterion_main!(benches);
