//! Cross-domain active query selection (CADA).
//!
//! A source-domain complexity model ranks unlabeled target points for
//! labeling. Each target point gets a score combining:
//!
//! * its *complexity proximity*: the distance-weighted mean local
//!   complexity of its nearest source points, so points lying where the
//!   source classes overlap come first;
//! * its *density*: how close it is to other target points relative to
//!   the target average, so outliers are demoted.
//!
//! Target labels are never read: `query()` only returns indices.
use std::cmp::{min, Reverse};

use log::debug;
use ndarray::prelude::*;
use ordered_float::OrderedFloat;
use statrs::statistics::Statistics;

use crate::complexity::ComplexityEstimator;
use crate::dataset::{Dataset, Label};
use crate::error::{Error, Result};
use crate::neighbors::{NeighborTable, nearest};

// Keeps inverse-distance weights finite for points coinciding with a
// source point.
const DISTANCE_EPS: f64 = 1e-12;


/// Parameters of a `Cada` selector.
#[derive(Clone, Debug, PartialEq)]
pub struct CadaConfig {
    /// Windows of the source complexity estimator.
    pub n_windows: usize,
    /// Largest neighborhood of the source complexity estimator; capped
    /// at the number of source samples minus one.
    pub nk: usize,
    /// Source points used to estimate a target point's complexity.
    pub source_neighbors: usize,
    /// Target points used to estimate a target point's density.
    pub target_neighbors: usize,
    /// Weight in [0,1] of density in the combined score.
    pub density_weight: f64,
}

impl Default for CadaConfig {
    fn default() -> CadaConfig {
        CadaConfig {
            n_windows: 10,
            nk: 10,
            source_neighbors: 10,
            target_neighbors: 10,
            density_weight: 0.3,
        }
    }
}

/// Ranks target points using a source-domain complexity model.
pub struct Cada {
    estimator: ComplexityEstimator,
    config: CadaConfig,
}

impl Cada {
    /// Fits a source complexity model with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// #[macro_use(array)]
    /// extern crate ndarray;
    /// extern crate cada;
    ///
    /// # fn main() {
    /// use cada::Cada;
    ///
    /// let src_inputs = array![[0., 0.], [0., 1.], [1., 0.], [1., 1.]];
    /// let src_targets = array![0, 1, 1, 0];
    /// let tgt_inputs = array![[0.5, 0.5], [5., 5.], [0., 0.2]];
    ///
    /// let cada = Cada::new(&src_inputs.view(), &src_targets.view())
    ///                 .expect("Invalid source");
    /// let ixs = cada.query(&tgt_inputs.view(), 2).expect("Invalid target");
    /// assert_eq!(ixs.len(), 2);
    /// # }
    /// ```
    pub fn new(inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>) -> Result<Cada> {
        Cada::with_config(inputs, targets, CadaConfig::default())
    }

    /// Fits a source complexity model with the given configuration.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` if the source is not a valid input for a
    /// `ComplexityEstimator`, or the configuration is out of range.
    pub fn with_config(inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>,
                       config: CadaConfig) -> Result<Cada> {
        if !(0. ..=1.).contains(&config.density_weight) {
            return Err(Error::invalid(format!("density weight must be in [0,1], got {}",
                                              config.density_weight)));
        }
        if config.source_neighbors == 0 || config.target_neighbors == 0 {
            return Err(Error::invalid("neighbor counts must be positive"));
        }

        let dataset = Dataset::from_views(inputs, targets)?;
        let nk = min(config.nk, dataset.len().saturating_sub(1));
        let estimator = ComplexityEstimator::from_dataset(dataset, config.n_windows, nk)?;

        Ok(Cada { estimator, config })
    }

    /// The source complexity model.
    pub fn estimator(&self) -> &ComplexityEstimator {
        &self.estimator
    }

    pub fn config(&self) -> &CadaConfig {
        &self.config
    }

    /// Returns the combined score of each target point, in [0,1];
    /// higher means queried earlier.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` if target and source dimensionality differ.
    pub fn scores(&self, target: &ArrayView2<f64>) -> Result<Array1<f64>> {
        let source = self.estimator.dataset();
        if target.ncols() != source.dim() {
            return Err(Error::invalid(format!("source has {} features, target has {}",
                                              source.dim(), target.ncols())));
        }

        let proximity = self.complexity_proximity(target);
        let density = self.density(target)?;
        let w = self.config.density_weight;

        Ok(Array::from_iter(proximity.iter()
                                     .zip(density.iter())
                                     .map(|(c, d)| (1. - w) * c + w * d)))
    }

    /// Returns `n` distinct target indices, the highest scoring first;
    /// ties go to the lowest index.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` if `n` exceeds the number of target points,
    /// or if target and source dimensionality differ.
    pub fn query(&self, target: &ArrayView2<f64>, n: usize) -> Result<Vec<usize>> {
        if n > target.nrows() {
            return Err(Error::invalid(format!("cannot query {} of {} target points",
                                              n, target.nrows())));
        }
        let scores = self.scores(target)?;

        let mut ranked = (0..target.nrows()).collect::<Vec<_>>();
        ranked.sort_by_key(|&i| (Reverse(OrderedFloat(scores[i])), i));
        ranked.truncate(n);
        debug!("CADA selected {} of {} target points: {:?}", n, target.nrows(), ranked);

        Ok(ranked)
    }

    /// Distance-weighted mean of the local complexity of the nearest
    /// source points of each target point.
    fn complexity_proximity(&self, target: &ArrayView2<f64>) -> Vec<f64> {
        let source = self.estimator.dataset();
        let complexity = self.estimator.local_complexity();
        let k = min(self.config.source_neighbors, source.len());

        target.outer_iter()
              .map(|x| {
                  let neighbors = nearest(&x, &source.inputs(), k, None);
                  let (num, den) = neighbors.iter()
                                            .fold((0., 0.), |(num, den), &(d, j)| {
                                                let w = 1. / (d + DISTANCE_EPS);
                                                (num + w * complexity[j], den + w)
                                            });
                  num / den
              })
              .collect()
    }

    /// Density of each target point in (0,1]: `1 / (1 + r / r_mean)`,
    /// where `r` is its mean distance to its nearest target points and
    /// `r_mean` the average of `r` over the target. Points where
    /// `r_mean` is 0 (or a lone target point) get density 1.
    fn density(&self, target: &ArrayView2<f64>) -> Result<Vec<f64>> {
        let n = target.nrows();
        if n < 2 {
            return Ok(vec![1.; n]);
        }

        let k = min(self.config.target_neighbors, n - 1);
        let table = NeighborTable::new(target, k)?;
        let radii = (0..n).map(|i| table.distances(i).iter().mean())
                          .collect::<Vec<_>>();
        let scale = radii.iter().mean();

        Ok(radii.into_iter()
                .map(|r| if scale > 0. { 1. / (1. + r / scale) } else { 1. })
                .collect())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    /// Source classes overlap around x=5; elsewhere they are separated.
    fn source() -> (Array2<f64>, Array1<Label>) {
        let inputs = array![[0.], [1.], [2.], [4.9], [5.], [5.1], [5.2], [8.], [9.], [10.]];
        let targets = array![0, 0, 0, 0, 1, 0, 1, 1, 1, 1];
        (inputs, targets)
    }

    #[test]
    fn overlap_first() {
        let (inputs, targets) = source();
        let config = CadaConfig { nk: 2, source_neighbors: 2, target_neighbors: 2,
                                  density_weight: 0., ..Default::default() };
        let cada = Cada::with_config(&inputs.view(), &targets.view(), config).unwrap();

        let target = array![[0.5], [5.05], [9.5], [1.5]];
        let ixs = cada.query(&target.view(), 4).unwrap();
        assert_eq!(ixs[0], 1);
    }

    #[test]
    fn outliers_demoted() {
        let (inputs, targets) = source();
        let config = CadaConfig { nk: 2, target_neighbors: 2, density_weight: 1.,
                                  ..Default::default() };
        let cada = Cada::with_config(&inputs.view(), &targets.view(), config).unwrap();

        let target = array![[0.], [0.1], [0.2], [100.]];
        let ixs = cada.query(&target.view(), 4).unwrap();
        assert_eq!(ixs[3], 3);
        assert_eq!(ixs[0], 1);
    }

    #[test]
    fn scores_in_range() {
        let (inputs, targets) = source();
        let cada = Cada::new(&inputs.view(), &targets.view()).unwrap();
        let target = array![[0.5], [5.05], [9.5], [1.5], [5.]];

        for s in cada.scores(&target.view()).unwrap().iter() {
            assert!(*s >= 0. && *s <= 1.);
        }
    }

    #[test]
    fn invalid() {
        let (inputs, targets) = source();
        let cada = Cada::new(&inputs.view(), &targets.view()).unwrap();

        assert!(cada.query(&array![[0.], [1.]].view(), 3).is_err());
        assert!(cada.query(&array![[0., 1.], [1., 1.]].view(), 1).is_err());
        assert_eq!(cada.query(&array![[0.]].view(), 0).unwrap(), Vec::<usize>::new());

        let config = CadaConfig { density_weight: 1.5, ..Default::default() };
        assert!(Cada::with_config(&inputs.view(), &targets.view(), config).is_err());
    }
}
