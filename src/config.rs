use crate::algorithm::Algorithm;
use crate::input::random_array;
use crate::quick_sort::PivotStrategy;

pub const DEFAULT_SEED: u64 = 0;
pub const DEFAULT_ARRAY_SIZE: usize = 30;
/// Random arrays draw from `[MIN_VALUE, MAX_VALUE)`.
pub const MIN_VALUE: i64 = 1;
pub const MAX_VALUE: i64 = 100;
pub const DEFAULT_SECONDS_PER_STEP: f64 = 0.5;

pub const BAR_WIDTH: usize = 50;
pub const FACTORIAL_LIMIT: u32 = 20;

pub const DEFAULT_BENCH_RUNS: usize = 5;
pub const DEFAULT_BENCH_INITIAL_SIZE: usize = 1000;
pub const DEFAULT_BENCH_SIZE_INCREMENT: usize = 1000;
/// Quick sort with the last-element pivot recurses once per element on
/// ordered input; larger Worst-case runs are skipped.
pub const MAX_WORST_QUICK_SORT_SIZE: usize = 10_000;

const _: () = {
    assert!(MIN_VALUE < MAX_VALUE, "value range must not be empty");
    assert!(DEFAULT_ARRAY_SIZE > 0, "default array must hold elements");
    assert!(BAR_WIDTH > 0);
    assert!(DEFAULT_BENCH_INITIAL_SIZE > 0, "benchmarks need non-empty inputs");
    assert!(
        DEFAULT_BENCH_INITIAL_SIZE + (DEFAULT_BENCH_RUNS - 1) * DEFAULT_BENCH_SIZE_INCREMENT
            <= MAX_WORST_QUICK_SORT_SIZE
    );
};

/// Everything needed to produce one trace.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceConfig {
    pub algorithm: Algorithm,
    pub size: usize,
    pub seed: u64,
    pub pivot: PivotStrategy,
    /// Required for searches, ignored by sorts.
    pub target: Option<i64>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            algorithm: Algorithm::MergeSort,
            size: DEFAULT_ARRAY_SIZE,
            seed: DEFAULT_SEED,
            pivot: PivotStrategy::Last,
            target: None,
        }
    }
}

impl TraceConfig {
    /// `size` random values drawn with `seed`, sorted when the algorithm searches.
    pub fn input(&self) -> Vec<i64> {
        let mut input = random_array(self.size, self.seed);
        if self.algorithm.is_search() {
            input.sort_unstable();
        }
        input
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    pub runs: usize,
    pub initial_size: usize,
    pub size_increment: usize,
    pub seed: u64,
}

impl BenchmarkConfig {
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.runs).map(move |k| self.initial_size + k * self.size_increment)
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            runs: DEFAULT_BENCH_RUNS,
            initial_size: DEFAULT_BENCH_INITIAL_SIZE,
            size_increment: DEFAULT_BENCH_SIZE_INCREMENT,
            seed: DEFAULT_SEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_sizes_step_by_increment() {
        let config = BenchmarkConfig {
            runs: 3,
            initial_size: 10,
            size_increment: 5,
            seed: 1,
        };
        assert_eq!(config.sizes().collect::<Vec<_>>(), vec![10, 15, 20]);
    }

    #[test]
    fn trace_input_follows_size_and_seed() {
        let config = TraceConfig {
            size: 12,
            seed: 4,
            ..TraceConfig::default()
        };
        assert_eq!(config.input(), random_array(12, 4));
        assert_ne!(config.input(), TraceConfig { seed: 5, ..config.clone() }.input());

        let search = TraceConfig {
            algorithm: Algorithm::BinarySearch,
            ..config
        };
        let input = search.input();
        assert_eq!(input.len(), 12);
        assert!(input.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn zero_runs_yield_no_sizes() {
        let config = BenchmarkConfig {
            runs: 0,
            ..BenchmarkConfig::default()
        };
        assert_eq!(config.sizes().count(), 0);
    }
}
