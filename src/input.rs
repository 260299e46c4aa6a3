use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{MAX_VALUE, MIN_VALUE};
use crate::error::BenchmarkError;

/// Shape of a benchmark input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Case {
    Best,
    Average,
    Worst,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Best, Case::Average, Case::Worst];

    pub fn as_str(self) -> &'static str {
        match self {
            Case::Best => "Best",
            Case::Average => "Average",
            Case::Worst => "Worst",
        }
    }

    /// First case label mentioned anywhere in `text`.
    pub fn find_in(text: &str) -> Option<Case> {
        Case::ALL
            .into_iter()
            .find(|case| text.contains(case.as_str()))
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Case {
    type Err = BenchmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best" => Ok(Case::Best),
            "average" | "avg" => Ok(Case::Average),
            "worst" => Ok(Case::Worst),
            _ => Err(BenchmarkError::UnknownCase {
                label: s.to_string(),
            }),
        }
    }
}

/// `len` values in `[MIN_VALUE, MAX_VALUE)`, reproducible for a given seed.
pub fn random_array(len: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(MIN_VALUE..MAX_VALUE)).collect()
}

/// Input for timing a sort: ascending, uniform in `[0, 2n]`, or descending.
pub fn sort_input(case: Case, size: usize, rng: &mut StdRng) -> Vec<i64> {
    let n = size as i64;
    match case {
        Case::Best => (0..n).collect(),
        Case::Average => (0..size).map(|_| rng.gen_range(0..=2 * n)).collect(),
        Case::Worst => (0..n).rev().collect(),
    }
}

/// Sorted input plus a present target for timing a search.
///
/// Best probes the middle first, Worst searches for the last element, and
/// Average picks a random element of a sorted uniform sample.
pub fn search_input(case: Case, size: usize, rng: &mut StdRng) -> (Vec<i64>, Option<i64>) {
    let n = size as i64;
    let data: Vec<i64> = match case {
        Case::Best => (0..n).collect(),
        Case::Worst => (-n / 2..n - n / 2).collect(),
        Case::Average => {
            let mut data: Vec<i64> = (0..size).map(|_| rng.gen_range(-n..=n)).collect();
            data.sort_unstable();
            data
        }
    };
    let target = match case {
        _ if data.is_empty() => None,
        Case::Best => Some(data[(size - 1) / 2]),
        Case::Worst => data.last().copied(),
        Case::Average => Some(data[rng.gen_range(0..size)]),
    };
    (data, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_array_is_seeded_and_in_range() {
        let a = random_array(30, 0);
        assert_eq!(a, random_array(30, 0));
        assert_ne!(a, random_array(30, 1));
        assert!(a.iter().all(|v| (MIN_VALUE..MAX_VALUE).contains(v)));
    }

    #[test]
    fn sort_inputs_have_requested_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sort_input(Case::Best, 4, &mut rng), vec![0, 1, 2, 3]);
        assert_eq!(sort_input(Case::Worst, 4, &mut rng), vec![3, 2, 1, 0]);
        let average = sort_input(Case::Average, 50, &mut rng);
        assert_eq!(average.len(), 50);
        assert!(average.iter().all(|v| (0..=100).contains(v)));
    }

    #[test]
    fn search_inputs_are_sorted_and_contain_target() {
        let mut rng = StdRng::seed_from_u64(9);
        for case in Case::ALL {
            let (data, target) = search_input(case, 101, &mut rng);
            assert_eq!(data.len(), 101);
            assert!(data.windows(2).all(|w| w[0] <= w[1]));
            assert!(data.contains(&target.unwrap()));
        }
        let (data, target) = search_input(Case::Best, 0, &mut rng);
        assert!(data.is_empty());
        assert_eq!(target, None);
    }

    #[test]
    fn case_labels_parse_loosely() {
        assert_eq!("Best".parse::<Case>().unwrap(), Case::Best);
        assert_eq!(" avg ".parse::<Case>().unwrap(), Case::Average);
        assert!("Typical".parse::<Case>().is_err());
        assert_eq!(Case::find_in("Quick Sort (Worst, Size: 10)"), Some(Case::Worst));
    }
}
