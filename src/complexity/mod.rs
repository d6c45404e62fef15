//! Dataset complexity estimation.
//!
//! The complexity of a labeled dataset is characterised by its
//! *complexity curve*: the leave-one-out k-NN error as a function of the
//! neighborhood size `k`. The normalized area under the curve (AUC) is a
//! scalar summary in [0,1]; higher values mean harder datasets.
//! A `ComplexityEstimator` additionally selects *seeds*, samples that are
//! representative of regions of different local complexity.
pub mod estimator;
pub mod seeds;

pub use self::estimator::ComplexityEstimator;
pub use self::seeds::{SeedSelector, SeedWindow, BoundarySeed, DensestSeed};


/// Leave-one-out k-NN error at increasing neighborhood sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexityCurve {
    ks: Vec<usize>,
    errors: Vec<f64>,
}

impl ComplexityCurve {
    /// Constructs a curve from neighborhood sizes and matching errors.
    ///
    /// # Panics
    ///
    /// - if `ks` and `errors` have different lengths, or are empty.
    /// - if `ks` is not strictly increasing.
    pub(crate) fn new(ks: Vec<usize>, errors: Vec<f64>) -> ComplexityCurve {
        assert!(!ks.is_empty() && ks.len() == errors.len());
        assert!(ks.windows(2).all(|w| w[0] < w[1]));

        ComplexityCurve { ks, errors }
    }

    /// Neighborhood sizes, strictly increasing.
    pub fn ks(&self) -> &[usize] {
        &self.ks
    }

    /// Error at each neighborhood size, in [0,1].
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Iterates over the `(k, error)` pairs.
    pub fn points<'a>(&'a self) -> impl Iterator<Item=(usize, f64)> + 'a {
        self.ks.iter()
               .cloned()
               .zip(self.errors.iter().cloned())
    }

    pub fn len(&self) -> usize {
        self.ks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ks.is_empty()
    }

    /// Normalized area under the curve.
    ///
    /// The curve is integrated with the trapezoidal rule and divided by
    /// the length of its domain, `k_max - k_min`; errors are at most 1,
    /// hence the result is in [0,1]. A single-point curve has AUC equal
    /// to its only error.
    pub fn auc(&self) -> f64 {
        if self.ks.len() == 1 {
            return self.errors[0];
        }

        let area = self.ks.windows(2)
                          .zip(self.errors.windows(2))
                          .map(|(k, e)| (k[1] - k[0]) as f64 * (e[0] + e[1]) / 2.)
                          .sum::<f64>();
        let width = (self.ks[self.ks.len()-1] - self.ks[0]) as f64;

        area / width
    }
}

/// Returns the neighborhood sizes of a curve: `n_windows` values evenly
/// spaced in [1, nk], rounded, with duplicates removed.
pub fn k_schedule(n_windows: usize, nk: usize) -> Vec<usize> {
    if n_windows <= 1 {
        return vec![nk];
    }

    let step = (nk - 1) as f64 / (n_windows - 1) as f64;
    let mut ks = (0..n_windows).map(|w| 1 + (w as f64 * step).round() as usize)
                               .collect::<Vec<_>>();
    ks.dedup();

    ks
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule() {
        assert_eq!(k_schedule(10, 10), (1..11).collect::<Vec<_>>());
        assert_eq!(k_schedule(3, 9), vec![1, 5, 9]);
        assert_eq!(k_schedule(1, 7), vec![7]);
        // More windows than sizes: duplicates are dropped.
        assert_eq!(k_schedule(5, 2), vec![1, 2]);
    }

    #[test]
    fn auc() {
        let curve = ComplexityCurve::new(vec![1, 3], vec![0., 1.]);
        assert_eq!(curve.auc(), 0.5);

        let curve = ComplexityCurve::new(vec![1, 2, 4], vec![0.2, 0.2, 0.2]);
        assert!((curve.auc() - 0.2).abs() < 1e-12);

        let curve = ComplexityCurve::new(vec![5], vec![0.3]);
        assert_eq!(curve.auc(), 0.3);
    }

    #[test]
    #[should_panic]
    fn not_increasing() {
        ComplexityCurve::new(vec![1, 1], vec![0., 0.]);
    }
}
