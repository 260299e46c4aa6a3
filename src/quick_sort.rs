use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::TraceError;
use crate::step::{Role, SourceMarker};
use crate::trace::StepSink;

pub const PSEUDOCODE: &[&str] = &[
    "quick_sort(arr, low, high):",
    "    if low < high:",
    "        p = partition(arr, low, high)",
    "        quick_sort(arr, low, p - 1)",
    "        quick_sort(arr, p + 1, high)",
    "partition(arr, low, high):",
    "    pivot = arr[high]; i = low",
    "    for j in low..high:",
    "        if arr[j] < pivot:",
    "            swap(arr[i], arr[j]); i += 1",
    "    swap(arr[i], arr[high])",
    "    return i",
];

const CHOOSE_PIVOT: SourceMarker = SourceMarker(7);
const SCAN: SourceMarker = SourceMarker(9);
const SWAP: SourceMarker = SourceMarker(10);
const PLACE_PIVOT: SourceMarker = SourceMarker(11);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotStrategy {
    /// Lomuto on the last element of the range.
    #[default]
    Last,
    /// Swap a seeded random element into the last slot, then Lomuto.
    Random { seed: u64 },
}

impl PivotStrategy {
    fn rng(self) -> Option<StdRng> {
        match self {
            PivotStrategy::Last => None,
            PivotStrategy::Random { seed } => Some(StdRng::seed_from_u64(seed)),
        }
    }
}

/// Sorts `arr` in place.
///
/// Recursion depth is the depth of the partition tree: with
/// `PivotStrategy::Last` that is `arr.len()` on already ordered input, so
/// very large ordered inputs can exhaust the thread's stack.
pub fn quick_sort<S: StepSink>(arr: &mut [i64], strategy: PivotStrategy, sink: &mut S) {
    if arr.len() > 1 {
        let mut rng = strategy.rng();
        sort_inclusive(arr, 0, arr.len() - 1, &mut rng, sink);
    }
}

/// Sorts `arr[low..=high]`. An inverted range is a valid no-op.
pub fn sort_range<S: StepSink>(
    arr: &mut [i64],
    low: usize,
    high: usize,
    strategy: PivotStrategy,
    sink: &mut S,
) -> Result<(), TraceError> {
    if low > high {
        return Ok(());
    }
    if high >= arr.len() {
        return Err(TraceError::IndexOutOfRange {
            index: high,
            len: arr.len(),
        });
    }
    let mut rng = strategy.rng();
    sort_inclusive(arr, low, high, &mut rng, sink);
    Ok(())
}

fn sort_inclusive<S: StepSink>(
    arr: &mut [i64],
    low: usize,
    high: usize,
    rng: &mut Option<StdRng>,
    sink: &mut S,
) {
    if low < high {
        let p = partition(arr, low, high, rng, sink);
        if p > low {
            sort_inclusive(arr, low, p - 1, rng, sink);
        }
        sort_inclusive(arr, p + 1, high, rng, sink);
    }
}

fn partition<S: StepSink>(
    arr: &mut [i64],
    low: usize,
    high: usize,
    rng: &mut Option<StdRng>,
    sink: &mut S,
) -> usize {
    if let Some(rng) = rng {
        let chosen = rng.gen_range(low..=high);
        if chosen != high {
            arr.swap(chosen, high);
            sink.emit(arr, CHOOSE_PIVOT, |a| {
                a.push(Role::Swap, chosen);
                a.push(Role::Swap, high);
            });
        }
    }

    let pivot = arr[high];
    let mut i = low;
    sink.emit(arr, CHOOSE_PIVOT, |a| a.push(Role::Pivot, high));
    for j in low..high {
        sink.count_comparison();
        sink.emit(arr, SCAN, |a| {
            a.push(Role::I, i);
            a.push(Role::J, j);
            a.push(Role::Pivot, high);
        });
        if arr[j] < pivot {
            arr.swap(i, j);
            sink.emit(arr, SWAP, |a| {
                a.push(Role::Swap, i);
                a.push(Role::Swap, j);
                a.push(Role::Pivot, high);
            });
            i += 1;
        }
    }
    arr.swap(i, high);
    sink.emit(arr, PLACE_PIVOT, |a| {
        a.push(Role::Swap, i);
        a.push(Role::Swap, high);
        a.push(Role::Pivot, i);
    });
    debug!("partitioned [{low}, {high}] around {pivot} at {i}");
    i
}
