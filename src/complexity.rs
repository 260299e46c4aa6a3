use std::fmt;

use crate::config::FACTORIAL_LIMIT;

/// Reference growth curves for charting measurements against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Complexity {
    Constant,
    Logarithmic,
    SquareRoot,
    Linear,
    Linearithmic,
    Quadratic,
    Exponential,
    Factorial,
}

impl Complexity {
    pub const ALL: [Complexity; 8] = [
        Complexity::Constant,
        Complexity::Logarithmic,
        Complexity::SquareRoot,
        Complexity::Linear,
        Complexity::Linearithmic,
        Complexity::Quadratic,
        Complexity::Exponential,
        Complexity::Factorial,
    ];

    pub fn evaluate(self, n: f64) -> f64 {
        match self {
            Complexity::Constant => 1.0,
            Complexity::Logarithmic => n.log2(),
            Complexity::SquareRoot => n.sqrt(),
            Complexity::Linear => n,
            Complexity::Linearithmic => n * n.log2(),
            Complexity::Quadratic => n * n,
            Complexity::Exponential => n.exp2(),
            Complexity::Factorial => {
                if n > FACTORIAL_LIMIT as f64 {
                    f64::INFINITY
                } else {
                    (2..=n as u32).map(f64::from).product()
                }
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Complexity::Constant => "1",
            Complexity::Logarithmic => "log2 n",
            Complexity::SquareRoot => "sqrt n",
            Complexity::Linear => "n",
            Complexity::Linearithmic => "n log2 n",
            Complexity::Quadratic => "n^2",
            Complexity::Exponential => "2^n",
            Complexity::Factorial => "n!",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O({})", self.label())
    }
}

/// `f(n)` for every class and every `n` in `1..=max_n`.
pub fn growth_table(max_n: usize) -> Vec<(usize, [f64; 8])> {
    (1..=max_n)
        .map(|n| (n, Complexity::ALL.map(|c| c.evaluate(n as f64))))
        .collect()
}

/// Least-squares fit of `y ≈ scale * f(n)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub complexity: Complexity,
    pub scale: f64,
    /// `sqrt(Σ(y - scale·f)² / Σy²)`: 0 is a perfect fit.
    pub relative_error: f64,
}

/// `None` when the curve is degenerate over these sizes (all zero or not finite).
pub fn fit(points: &[(usize, f64)], complexity: Complexity) -> Option<Fit> {
    let curve: Vec<(f64, f64)> = points
        .iter()
        .map(|&(n, y)| (complexity.evaluate(n as f64), y))
        .collect();
    if curve.is_empty() || curve.iter().any(|(f, _)| !f.is_finite()) {
        return None;
    }
    let ff: f64 = curve.iter().map(|(f, _)| f * f).sum();
    let fy: f64 = curve.iter().map(|(f, y)| f * y).sum();
    let yy: f64 = curve.iter().map(|(_, y)| y * y).sum();
    if ff == 0.0 || !ff.is_finite() {
        return None;
    }
    let scale = fy / ff;
    let residual: f64 = curve.iter().map(|(f, y)| (y - scale * f).powi(2)).sum();
    let relative_error = if yy == 0.0 {
        residual.sqrt()
    } else {
        (residual / yy).sqrt()
    };
    Some(Fit {
        complexity,
        scale,
        relative_error,
    })
}

/// The class whose scaled curve tracks `points` most closely.
pub fn best_fit(points: &[(usize, f64)]) -> Option<Fit> {
    Complexity::ALL
        .into_iter()
        .filter_map(|c| fit(points, c))
        .min_by(|a, b| a.relative_error.total_cmp(&b.relative_error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_match_closed_forms() {
        assert_eq!(Complexity::Linearithmic.evaluate(8.0), 24.0);
        assert_eq!(Complexity::Exponential.evaluate(10.0), 1024.0);
        assert_eq!(Complexity::Factorial.evaluate(5.0), 120.0);
        assert_eq!(Complexity::Factorial.evaluate(1.0), 1.0);
        assert!(Complexity::Factorial.evaluate(21.0).is_infinite());
    }

    #[test]
    fn growth_table_covers_every_class() {
        let table = growth_table(4);
        assert_eq!(table.len(), 4);
        assert_eq!(table[3].0, 4);
        assert_eq!(table[3].1[5], 16.0);
    }

    #[test]
    fn best_fit_recovers_generating_curve() {
        let quadratic: Vec<(usize, f64)> = (1..=10usize)
            .map(|k| (k * 100, 3.0 * ((k * 100) as f64).powi(2)))
            .collect();
        let fit = best_fit(&quadratic).unwrap();
        assert_eq!(fit.complexity, Complexity::Quadratic);
        assert!((fit.scale - 3.0).abs() < 1e-9);

        let nlogn: Vec<(usize, f64)> = (1..=10usize)
            .map(|k| (k * 1000, 2.0 * Complexity::Linearithmic.evaluate((k * 1000) as f64)))
            .collect();
        assert_eq!(best_fit(&nlogn).unwrap().complexity, Complexity::Linearithmic);
    }

    #[test]
    fn explosive_curves_are_skipped() {
        let points = vec![(1000, 5.0), (2000, 9.0)];
        assert!(fit(&points, Complexity::Factorial).is_none());
        assert!(fit(&points, Complexity::Exponential).is_none());
        assert!(fit(&[], Complexity::Linear).is_none());
    }
}
