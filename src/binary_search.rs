use std::cmp::Ordering;

use log::debug;

use crate::error::TraceError;
use crate::step::{Role, SourceMarker};
use crate::trace::StepSink;

pub const PSEUDOCODE: &[&str] = &[
    "binary_search(arr, target):",
    "    left, right = 0, n - 1",
    "    while left <= right:",
    "        mid = (left + right) / 2",
    "        if arr[mid] == target: return mid",
    "        elif arr[mid] < target: left = mid + 1",
    "        else: right = mid - 1",
    "    return not found",
];

const PROBE: SourceMarker = SourceMarker(4);
const FOUND: SourceMarker = SourceMarker(5);
const EXHAUSTED: SourceMarker = SourceMarker(8);

/// Iterative halving over a sorted slice. One step per probe, then either a
/// `found` step or an empty terminal step. An empty slice emits nothing.
pub fn binary_search<S: StepSink>(arr: &[i64], target: i64, sink: &mut S) -> Option<usize> {
    if arr.is_empty() {
        return None;
    }
    let (mut left, mut right) = (0, arr.len() - 1);
    while left <= right {
        let mid = (left + right) / 2;
        sink.count_comparison();
        sink.emit(arr, PROBE, |a| {
            a.push(Role::Left, left);
            a.push(Role::Right, right);
            a.push(Role::Mid, mid);
        });
        match arr[mid].cmp(&target) {
            Ordering::Equal => {
                sink.emit(arr, FOUND, |a| a.push(Role::Found, mid));
                debug!("found {target} at {mid}");
                return Some(mid);
            }
            Ordering::Less => left = mid + 1,
            Ordering::Greater => {
                if mid == 0 {
                    break;
                }
                right = mid - 1;
            }
        }
    }
    sink.emit(arr, EXHAUSTED, |_| {});
    debug!("{target} not present");
    None
}

/// Fails with the index of the first element smaller than its predecessor.
pub fn check_sorted(arr: &[i64]) -> Result<(), TraceError> {
    match arr.windows(2).position(|w| w[0] > w[1]) {
        Some(i) => Err(TraceError::UnsortedInput { index: i + 1 }),
        None => Ok(()),
    }
}
