use proptest::prelude::*;

use algotrace::{record, Algorithm, PivotStrategy, Role, SourceMarker, TraceConfig};

fn config(algorithm: Algorithm, pivot: PivotStrategy, target: Option<i64>) -> TraceConfig {
    TraceConfig {
        algorithm,
        pivot,
        target,
        ..TraceConfig::default()
    }
}

fn sort_configs(seed: u64) -> [TraceConfig; 3] {
    [
        config(Algorithm::MergeSort, PivotStrategy::Last, None),
        config(Algorithm::QuickSort, PivotStrategy::Last, None),
        config(Algorithm::QuickSort, PivotStrategy::Random { seed }, None),
    ]
}

fn sorted(values: &[i64]) -> Vec<i64> {
    let mut values = values.to_vec();
    values.sort_unstable();
    values
}

proptest! {
    #[test]
    fn every_step_is_a_permutation_of_the_input(
        input in prop::collection::vec(-20i64..20, 0..48),
        seed in any::<u64>(),
    ) {
        let expected = sorted(&input);
        for config in sort_configs(seed) {
            let trace = record(&config, &input).unwrap();
            prop_assert_eq!(trace.input_len(), input.len());
            for step in &trace {
                prop_assert_eq!(step.len(), input.len());
                prop_assert_eq!(sorted(&step.snapshot), expected.clone());
                for (_, index) in step.annotations.indices() {
                    prop_assert!(index < input.len());
                }
            }
            if input.len() > 1 {
                prop_assert_eq!(trace.final_snapshot().unwrap(), &expected[..]);
            }
        }
    }

    #[test]
    fn operation_counts_never_decrease(input in prop::collection::vec(any::<i64>(), 0..40)) {
        for config in sort_configs(7) {
            let trace = record(&config, &input).unwrap();
            let counts: Vec<usize> = trace.iter().map(|step| step.operations).collect();
            prop_assert!(counts.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(counts.last().copied().unwrap_or(0), trace.comparisons());
        }
    }

    #[test]
    fn sorting_sorted_input_keeps_it_sorted(input in prop::collection::vec(-5i64..5, 2..32)) {
        let input = sorted(&input);
        for config in sort_configs(3) {
            let trace = record(&config, &input).unwrap();
            prop_assert_eq!(trace.final_snapshot().unwrap(), &input[..]);
        }
    }

    #[test]
    fn binary_search_finds_present_targets(
        input in prop::collection::vec(-1000i64..1000, 1..64),
        pick in any::<prop::sample::Index>(),
    ) {
        let input = sorted(&input);
        let target = input[pick.index(input.len())];
        let trace = record(&config(Algorithm::BinarySearch, PivotStrategy::Last, Some(target)), &input).unwrap();
        let last = trace.last().unwrap();
        prop_assert_eq!(last.marker, SourceMarker(5));
        let found = last.annotations.get(Role::Found).unwrap()[0];
        prop_assert_eq!(input[found], target);
        prop_assert!(trace.iter().all(|step| step.snapshot == input));
    }

    #[test]
    fn binary_search_probes_are_logarithmic(
        input in prop::collection::vec(-1000i64..1000, 1..200),
        target in -1100i64..1100,
    ) {
        let input = sorted(&input);
        let trace = record(&config(Algorithm::BinarySearch, PivotStrategy::Last, Some(target)), &input).unwrap();
        let probes = trace.iter().filter(|step| step.marker == SourceMarker(4)).count();
        let bound = (usize::BITS - input.len().leading_zeros()) as usize;
        prop_assert!(probes <= bound, "{} probes over {} elements", probes, input.len());

        let last = trace.last().unwrap();
        if input.contains(&target) {
            prop_assert!(last.annotations.contains(Role::Found));
        } else {
            prop_assert_eq!(last.marker, SourceMarker(8));
            prop_assert!(last.annotations.is_empty());
        }
    }
}
