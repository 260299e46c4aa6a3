use log::debug;

use crate::error::TraceError;
use crate::step::{Role, SourceMarker};
use crate::trace::StepSink;

pub const PSEUDOCODE: &[&str] = &[
    "merge_sort(arr, left, right):",
    "    if left >= right: return",
    "    mid = (left + right) / 2",
    "    merge_sort(arr, left, mid)",
    "    merge_sort(arr, mid + 1, right)",
    "    merge(arr, left, mid, right)",
    "merge(arr, left, mid, right):",
    "    i, j = left, mid + 1",
    "    while i <= mid and j <= right:",
    "        take the smaller of arr[i], arr[j] (left on ties)",
    "    drain the rest of the left run",
    "    drain the rest of the right run",
    "    copy merged back into arr[left..=right]",
];

const SPLIT: SourceMarker = SourceMarker(3);
const MERGE_BEGIN: SourceMarker = SourceMarker(8);
const COMPARE: SourceMarker = SourceMarker(10);
const DRAIN_LEFT: SourceMarker = SourceMarker(11);
const DRAIN_RIGHT: SourceMarker = SourceMarker(12);
const COPY_BACK: SourceMarker = SourceMarker(13);

pub fn merge_sort<S: StepSink>(arr: &mut [i64], sink: &mut S) {
    if arr.len() > 1 {
        sort_inclusive(arr, 0, arr.len() - 1, sink);
    }
}

/// Sorts `arr[left..=right]`. An inverted range is a valid no-op.
pub fn sort_range<S: StepSink>(
    arr: &mut [i64],
    left: usize,
    right: usize,
    sink: &mut S,
) -> Result<(), TraceError> {
    if left > right {
        return Ok(());
    }
    if right >= arr.len() {
        return Err(TraceError::IndexOutOfRange {
            index: right,
            len: arr.len(),
        });
    }
    sort_inclusive(arr, left, right, sink);
    Ok(())
}

fn sort_inclusive<S: StepSink>(arr: &mut [i64], left: usize, right: usize, sink: &mut S) {
    if left >= right {
        return;
    }
    let mid = (left + right) / 2;
    sink.emit(arr, SPLIT, |a| {
        a.push(Role::Low, left);
        a.push(Role::Mid, mid);
        a.push(Role::High, right);
    });
    sort_inclusive(arr, left, mid, sink);
    sort_inclusive(arr, mid + 1, right, sink);
    merge(arr, left, mid, right, sink);
}

fn merge<S: StepSink>(arr: &mut [i64], left: usize, mid: usize, right: usize, sink: &mut S) {
    let mut merged = Vec::with_capacity(right - left + 1);
    let (mut i, mut j) = (left, mid + 1);

    sink.emit(arr, MERGE_BEGIN, |a| {
        a.push(Role::Left, i);
        a.push(Role::Right, j);
    });
    while i <= mid && j <= right {
        sink.count_comparison();
        sink.emit(arr, COMPARE, |a| {
            a.push(Role::Left, i);
            a.push(Role::Right, j);
        });
        if arr[i] <= arr[j] {
            merged.push(arr[i]);
            i += 1;
        } else {
            merged.push(arr[j]);
            j += 1;
        }
    }
    while i <= mid {
        sink.emit(arr, DRAIN_LEFT, |a| a.push(Role::Left, i));
        merged.push(arr[i]);
        i += 1;
    }
    while j <= right {
        sink.emit(arr, DRAIN_RIGHT, |a| a.push(Role::Right, j));
        merged.push(arr[j]);
        j += 1;
    }

    if S::RECORDING {
        // arr[dest..=right] always holds exactly the values still to be written,
        // so rotating each one into place keeps every snapshot a permutation.
        for (k, value) in merged.into_iter().enumerate() {
            let dest = left + k;
            if let Some(offset) = arr[dest..=right].iter().position(|&v| v == value) {
                arr[dest..=dest + offset].rotate_right(1);
            }
            sink.emit(arr, COPY_BACK, |a| a.push(Role::Merged, dest));
        }
    } else {
        arr[left..=right].copy_from_slice(&merged);
    }
    debug!("merged [{left}, {right}]");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::trace::{NullSink, TraceRecorder};

    fn trace_of(input: &[i64]) -> crate::trace::Trace {
        let mut arr = input.to_vec();
        let mut recorder = TraceRecorder::new(arr.len());
        merge_sort(&mut arr, &mut recorder);
        recorder.finish(Algorithm::MergeSort)
    }

    #[test]
    fn first_split_is_at_floor_midpoint() {
        let trace = trace_of(&[5, 3, 8, 1]);
        let first = trace.get(0).unwrap();
        assert_eq!(first.marker, SPLIT);
        assert_eq!(first.annotations.get(Role::Low), Some(&[0][..]));
        assert_eq!(first.annotations.get(Role::Mid), Some(&[1][..]));
        assert_eq!(first.annotations.get(Role::High), Some(&[3][..]));
        assert_eq!(trace.final_snapshot(), Some(&[1, 3, 5, 8][..]));
    }

    #[test]
    fn merge_emits_begin_compare_drain_and_copy_back() {
        let trace = trace_of(&[5, 3]);
        let markers: Vec<_> = trace.iter().map(|s| s.marker).collect();
        assert_eq!(
            markers,
            vec![SPLIT, MERGE_BEGIN, COMPARE, DRAIN_LEFT, COPY_BACK, COPY_BACK]
        );
        assert_eq!(trace.comparisons(), 1);
        let last = trace.last().unwrap();
        assert_eq!(last.annotations.get(Role::Merged), Some(&[1][..]));
        assert_eq!(last.snapshot, vec![3, 5]);
    }

    #[test]
    fn equal_fronts_take_left_first() {
        let trace = trace_of(&[2, 2]);
        let markers: Vec<_> = trace.iter().map(|s| s.marker).collect();
        // left element taken on the tie, so the right run is drained
        assert_eq!(markers[3], DRAIN_RIGHT);
    }

    #[test]
    fn degenerate_inputs_produce_no_steps() {
        assert!(trace_of(&[]).is_empty());
        assert!(trace_of(&[7]).is_empty());
    }

    #[test]
    fn inverted_range_is_empty_and_overlong_range_fails() {
        let mut arr = vec![3, 2, 1];
        let mut recorder = TraceRecorder::new(3);
        sort_range(&mut arr, 2, 1, &mut recorder).unwrap();
        assert!(recorder.is_empty());
        assert_eq!(
            sort_range(&mut arr, 0, 3, &mut recorder),
            Err(TraceError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn sort_range_leaves_outside_untouched() {
        let mut arr = vec![9, 4, 3, 2, 0];
        sort_range(&mut arr, 1, 3, &mut NullSink).unwrap();
        assert_eq!(arr, vec![9, 2, 3, 4, 0]);
    }

    #[test]
    fn unrecorded_sort_matches_std() {
        let mut arr = vec![10, -4, 7, 7, 0, 3, 99, -4];
        let mut expected = arr.clone();
        expected.sort();
        merge_sort(&mut arr, &mut NullSink);
        assert_eq!(arr, expected);
    }
}
