//! k-NN complexity estimator.
use std::cell::OnceCell;

use log::{debug, warn};
use ndarray::prelude::*;

use crate::complexity::{ComplexityCurve, k_schedule};
use crate::complexity::seeds::{SeedSelector, SeedWindow, BoundarySeed,
                               window_ranges, sort_by_complexity};
use crate::dataset::{Dataset, Label};
use crate::error::{Error, Result};
use crate::neighbors::{NeighborTable, majority_vote};


/// Estimates how hard a labeled dataset is to classify locally.
///
/// The neighbor table is built on construction; the complexity curve,
/// the per-sample local complexity, the seeds and the AUC are computed
/// on first request and cached for the lifetime of the estimator.
pub struct ComplexityEstimator {
    dataset: Dataset,
    n_windows: usize,
    nk: usize,
    table: NeighborTable,
    selector: Box<dyn SeedSelector>,
    curve: OnceCell<ComplexityCurve>,
    local: OnceCell<Array1<f64>>,
    seeds: OnceCell<Vec<usize>>,
    auc: OnceCell<f64>,
}

impl ComplexityEstimator {
    /// Constructs an estimator for a labeled dataset.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Matrix with one sample per row.
    /// * `targets` - Label of each sample.
    /// * `n_windows` - Number of points of the complexity curve, and
    ///                 number of seed groups.
    /// * `nk` - Largest neighborhood size; must be smaller than the
    ///          number of samples.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` if there are fewer than 2 samples, if
    /// `nk` is 0 or not smaller than the number of samples, if
    /// `n_windows` is 0, or if there are fewer than 2 distinct labels.
    ///
    /// # Examples
    ///
    /// ```
    /// #[macro_use(array)]
    /// extern crate ndarray;
    /// extern crate cada;
    ///
    /// # fn main() {
    /// use cada::ComplexityEstimator;
    ///
    /// let inputs = array![[0., 0.], [0., 1.], [1., 0.],
    ///                     [9., 9.], [9., 8.], [8., 9.]];
    /// let targets = array![0, 0, 0, 1, 1, 1];
    ///
    /// let est = ComplexityEstimator::new(&inputs.view(), &targets.view(), 2, 2)
    ///                               .expect("Invalid dataset");
    /// assert_eq!(est.auc(), 0.);
    /// assert_eq!(est.seeds().len(), 2);
    /// # }
    /// ```
    pub fn new(inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>,
               n_windows: usize, nk: usize) -> Result<ComplexityEstimator> {
        let dataset = Dataset::from_views(inputs, targets)?;
        ComplexityEstimator::from_dataset(dataset, n_windows, nk)
    }

    /// Constructs an estimator taking ownership of a dataset.
    ///
    /// See `new()` for arguments and errors.
    pub fn from_dataset(dataset: Dataset, n_windows: usize, nk: usize)
            -> Result<ComplexityEstimator> {
        let n = dataset.len();

        if n < 2 {
            return Err(Error::invalid(format!("need at least 2 samples, got {}", n)));
        }
        if nk == 0 || nk >= n {
            return Err(Error::invalid(format!("nK must be in [1, {}], got {}", n - 1, nk)));
        }
        if n_windows == 0 {
            return Err(Error::invalid("n_windows must be positive"));
        }
        let n_labels = dataset.labels().len();
        if n_labels < 2 {
            return Err(Error::invalid(format!("need at least 2 distinct labels, got {}",
                                              n_labels)));
        }
        if nk < n_windows {
            warn!("nK={} < n_windows={}: the complexity curve will have at most {} points",
                  nk, n_windows, nk);
        }

        let table = NeighborTable::new(&dataset.inputs(), nk)?;
        debug!("built {}-NN table over {} samples, {} labels", nk, n, n_labels);

        Ok(ComplexityEstimator {
            dataset,
            n_windows,
            nk,
            table,
            selector: Box::new(BoundarySeed),
            curve: OnceCell::new(),
            local: OnceCell::new(),
            seeds: OnceCell::new(),
            auc: OnceCell::new(),
        })
    }

    /// Replaces the seed selection policy.
    ///
    /// Only affects `seeds()`; the curve and AUC are independent of it.
    pub fn with_seed_selector<S>(mut self, selector: S) -> ComplexityEstimator
            where S: SeedSelector + 'static {
        self.selector = Box::new(selector);
        self.seeds = OnceCell::new();
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn table(&self) -> &NeighborTable {
        &self.table
    }

    pub fn n_windows(&self) -> usize {
        self.n_windows
    }

    pub fn nk(&self) -> usize {
        self.nk
    }

    /// Returns the complexity curve.
    pub fn get_k_complexity(&self) -> &ComplexityCurve {
        self.curve.get_or_init(|| {
            let ks = k_schedule(self.n_windows, self.nk);
            let errors = ks.iter()
                           .map(|&k| self.loo_error(k))
                           .collect::<Vec<_>>();
            debug!("complexity curve: ks={:?} errors={:?}", ks, errors);

            ComplexityCurve::new(ks, errors)
        })
    }

    /// Returns the normalized area under the complexity curve.
    pub fn auc(&self) -> f64 {
        *self.auc.get_or_init(|| self.get_k_complexity().auc())
    }

    /// Returns the local complexity of each sample: the fraction of its
    /// `nk` nearest neighbors whose label differs from its own.
    pub fn local_complexity(&self) -> ArrayView1<f64> {
        self.local.get_or_init(|| {
            let targets = self.dataset.targets();
            Array::from_iter((0..self.dataset.len()).map(|i| {
                let disagree = self.table.neighbors(i)
                                         .iter()
                                         .filter(|&&j| targets[j] != targets[i])
                                         .count();
                disagree as f64 / self.nk as f64
            }))
        }).view()
    }

    /// Returns the seeds: at most one sample per group of samples of
    /// similar local complexity, from the least to the most complex group.
    pub fn seeds(&self) -> &[usize] {
        self.seeds.get_or_init(|| {
            let complexity = self.local_complexity();
            let order = sort_by_complexity(&complexity);

            let seeds = window_ranges(order.len(), self.n_windows)
                .into_iter()
                .enumerate()
                .filter_map(|(position, range)| {
                    let members = &order[range];
                    let window = SeedWindow {
                        position,
                        members,
                        lower: complexity[members[0]],
                        upper: complexity[members[members.len()-1]],
                    };
                    self.selector.select(&window, &complexity, &self.table)
                })
                .collect::<Vec<_>>();
            debug!("selected {} seeds: {:?}", seeds.len(), seeds);

            seeds
        })
    }

    /// Leave-one-out error of the k-NN classifier.
    fn loo_error(&self, k: usize) -> f64 {
        let targets = self.dataset.targets();

        let errors = (0..self.dataset.len())
            .filter(|&i| {
                let labels = self.table.neighbors(i)
                                       .iter()
                                       .take(k)
                                       .map(|&j| targets[j])
                                       .collect::<Vec<_>>();
                majority_vote(labels) != Some(targets[i])
            })
            .count();

        errors as f64 / self.dataset.len() as f64
    }
}
