use std::collections::BTreeMap;
use std::hint::black_box;
use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::binary_search::binary_search;
use crate::config::{BenchmarkConfig, MAX_WORST_QUICK_SORT_SIZE};
use crate::input::{search_input, sort_input, Case};
use crate::merge_sort::merge_sort;
use crate::quick_sort::{quick_sort, PivotStrategy};
use crate::trace::NullSink;

/// One timed run: `{algorithm, case, size, duration}`.
///
/// `algorithm` stays a free-form name because ingested files may name
/// algorithms this crate does not implement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub algorithm: String,
    pub case: Case,
    pub size: usize,
    /// Microseconds.
    pub duration: f64,
}

impl BenchmarkRecord {
    /// `Merge Sort (Best, Size: 1000)`
    pub fn event_name(&self) -> String {
        format!("{} ({}, Size: {})", self.algorithm, self.case, self.size)
    }
}

/// Size-sorted `(size, duration)` points per (algorithm, case).
pub type Series = BTreeMap<(String, Case), Vec<(usize, f64)>>;

pub fn group_series(records: &[BenchmarkRecord]) -> Series {
    let mut series = Series::new();
    for record in records {
        series
            .entry((record.algorithm.clone(), record.case))
            .or_default()
            .push((record.size, record.duration));
    }
    for points in series.values_mut() {
        points.sort_by_key(|&(size, _)| size);
    }
    series
}

fn time_micros<F: FnOnce()>(f: F) -> f64 {
    let start = Instant::now();
    f();
    start.elapsed().as_secs_f64() * 1e6
}

/// Time every algorithm on every case for every configured size.
///
/// The algorithms run against `NullSink`, so nothing is recorded. Quick sort
/// uses the last-element pivot on the worst case and a seeded random pivot
/// otherwise.
pub fn run(config: &BenchmarkConfig) -> Vec<BenchmarkRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let total = config.runs * Case::ALL.len() * Algorithm::ALL.len();
    let mut records = Vec::with_capacity(total);

    for size in config.sizes() {
        for case in Case::ALL {
            let data = sort_input(case, size, &mut rng);

            let mut merge_data = data.clone();
            let duration = time_micros(|| merge_sort(black_box(&mut merge_data), &mut NullSink));
            push_measured(&mut records, total, Algorithm::MergeSort, case, size, duration);

            let strategy = match case {
                Case::Worst => PivotStrategy::Last,
                _ => PivotStrategy::Random { seed: config.seed },
            };
            if strategy == PivotStrategy::Last && size > MAX_WORST_QUICK_SORT_SIZE {
                warn!(
                    "skipping Quick Sort ({case}, Size: {size}): recursion would exceed {MAX_WORST_QUICK_SORT_SIZE} frames"
                );
            } else {
                let mut quick_data = data;
                let duration =
                    time_micros(|| quick_sort(black_box(&mut quick_data), strategy, &mut NullSink));
                push_measured(&mut records, total, Algorithm::QuickSort, case, size, duration);
            }

            let (sorted, target) = search_input(case, size, &mut rng);
            if let Some(target) = target {
                let duration = time_micros(|| {
                    black_box(binary_search(black_box(&sorted), target, &mut NullSink));
                });
                push_measured(&mut records, total, Algorithm::BinarySearch, case, size, duration);
            }
            debug!("finished {case} inputs of size {size}");
        }
    }
    records
}

fn push_measured(
    records: &mut Vec<BenchmarkRecord>,
    total: usize,
    algorithm: Algorithm,
    case: Case,
    size: usize,
    duration: f64,
) {
    let record = BenchmarkRecord {
        algorithm: algorithm.display_name().to_string(),
        case,
        size,
        duration,
    };
    info!(
        "{}/{total} {}: {duration:.1} us",
        records.len() + 1,
        record.event_name()
    );
    records.push(record);
}
