use std::fmt;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::binary_search::{self, binary_search, check_sorted};
use crate::complexity::Complexity;
use crate::config::TraceConfig;
use crate::error::TraceError;
use crate::input::Case;
use crate::merge_sort::{self, merge_sort};
use crate::quick_sort::{self, quick_sort};
use crate::trace::{Trace, TraceRecorder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    MergeSort,
    QuickSort,
    BinarySearch,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::MergeSort,
        Algorithm::QuickSort,
        Algorithm::BinarySearch,
    ];

    /// Name used in benchmark event names, e.g. `Merge Sort (Best, Size: 10)`.
    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::MergeSort => "Merge Sort",
            Algorithm::QuickSort => "Quick Sort",
            Algorithm::BinarySearch => "Binary Search",
        }
    }

    pub fn pseudocode(self) -> &'static [&'static str] {
        match self {
            Algorithm::MergeSort => merge_sort::PSEUDOCODE,
            Algorithm::QuickSort => quick_sort::PSEUDOCODE,
            Algorithm::BinarySearch => binary_search::PSEUDOCODE,
        }
    }

    pub fn is_search(self) -> bool {
        matches!(self, Algorithm::BinarySearch)
    }

    /// Theoretical running time for inputs shaped like `case`.
    ///
    /// Quick sort only degrades on its worst case because the benchmarks use
    /// the last-element pivot there and a random pivot otherwise.
    pub fn expected_complexity(self, case: Case) -> Complexity {
        match (self, case) {
            (Algorithm::MergeSort, _) => Complexity::Linearithmic,
            (Algorithm::QuickSort, Case::Worst) => Complexity::Quadratic,
            (Algorithm::QuickSort, _) => Complexity::Linearithmic,
            (Algorithm::BinarySearch, Case::Best) => Complexity::Constant,
            (Algorithm::BinarySearch, _) => Complexity::Logarithmic,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .replace(|c: char| c == ' ' || c == '_', "-");
        match normalized.as_str() {
            "merge" | "merge-sort" | "mergesort" => Ok(Algorithm::MergeSort),
            "quick" | "quick-sort" | "quicksort" => Ok(Algorithm::QuickSort),
            "binary" | "binary-search" | "search" => Ok(Algorithm::BinarySearch),
            _ => Err(TraceError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// Runs the configured algorithm on a private copy of `input` and returns
/// the complete trace. The caller's slice is never touched.
pub fn record(config: &TraceConfig, input: &[i64]) -> Result<Trace, TraceError> {
    let mut working = input.to_vec();
    let mut recorder = TraceRecorder::new(working.len());
    match config.algorithm {
        Algorithm::MergeSort => merge_sort(&mut working, &mut recorder),
        Algorithm::QuickSort => quick_sort(&mut working, config.pivot, &mut recorder),
        Algorithm::BinarySearch => {
            let target = config.target.ok_or(TraceError::MissingTarget)?;
            check_sorted(&working)?;
            binary_search(&working, target, &mut recorder);
        }
    }
    let trace = recorder.finish(config.algorithm);
    info!(
        "recorded {} over {} elements: {} steps",
        config.algorithm,
        input.len(),
        trace.len()
    );
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quick_sort::PivotStrategy;

    #[test]
    fn names_parse_in_several_spellings() {
        for (name, expected) in [
            ("merge", Algorithm::MergeSort),
            ("Merge Sort", Algorithm::MergeSort),
            ("quick_sort", Algorithm::QuickSort),
            ("Binary Search", Algorithm::BinarySearch),
        ] {
            assert_eq!(name.parse::<Algorithm>().unwrap(), expected);
        }
        assert!("Interpolation Search".parse::<Algorithm>().is_err());
    }

    #[test]
    fn record_leaves_input_untouched() {
        let input = vec![4, 2, 3, 1];
        let config = TraceConfig {
            algorithm: Algorithm::QuickSort,
            ..TraceConfig::default()
        };
        let trace = record(&config, &input).unwrap();
        assert_eq!(input, vec![4, 2, 3, 1]);
        assert_eq!(trace.final_snapshot(), Some(&[1, 2, 3, 4][..]));
        assert_eq!(trace.algorithm(), Algorithm::QuickSort);
    }

    #[test]
    fn search_requires_target_and_sorted_input() {
        let mut config = TraceConfig {
            algorithm: Algorithm::BinarySearch,
            ..TraceConfig::default()
        };
        assert_eq!(record(&config, &[1, 2]), Err(TraceError::MissingTarget));
        config.target = Some(2);
        assert_eq!(
            record(&config, &[3, 1]),
            Err(TraceError::UnsortedInput { index: 1 })
        );
        assert!(record(&config, &[1, 2]).is_ok());
    }

    #[test]
    fn recording_twice_is_identical() {
        let input = crate::input::random_array(40, 11);
        for algorithm in [Algorithm::MergeSort, Algorithm::QuickSort] {
            let config = TraceConfig {
                algorithm,
                pivot: PivotStrategy::Random { seed: 5 },
                ..TraceConfig::default()
            };
            assert_eq!(record(&config, &input), record(&config, &input));
        }
    }
}
