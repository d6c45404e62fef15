//! The cada crate.
//!
//! Dataset complexity estimation and active-learning query selection
//! for experiments comparing query strategies (random sampling,
//! uncertainty sampling, and the cross-domain CADA selector) on a labeled
//! source domain and a target domain whose labels are hidden.
//!
//! # Components
//! * `ComplexityEstimator`: leave-one-out k-NN error over growing
//!   neighborhoods (the *complexity curve*), its normalized AUC, and seeds
//!   marking regions of different local complexity.
//! * `Oracle`: reveals target labels one at a time, without replacement,
//!   at random or by uncertainty sampling.
//! * `Cada`: ranks target points for labeling using a source complexity
//!   model.
//! * `ActiveLearner`: the query/reveal/retrain loop.
//!
//! # Examples
//!
//! Estimate the complexity of a dataset whose classes overlap in the
//! middle, then query the two most informative target points.
//!
//! ```
//! #[macro_use(array)]
//! extern crate ndarray;
//! extern crate cada;
//!
//! # fn main() {
//! use cada::{ComplexityEstimator, Cada};
//!
//! let inputs = array![[0.], [1.], [2.], [3.], [4.], [5.]];
//! let targets = array![0, 0, 1, 0, 1, 1];
//!
//! let est = ComplexityEstimator::new(&inputs.view(), &targets.view(), 3, 3)
//!                               .expect("Invalid dataset");
//! let auc = est.auc();
//! assert!(auc > 0. && auc <= 1.);
//!
//! let cada = Cada::new(&inputs.view(), &targets.view())
//!                 .expect("Invalid source");
//! let target = array![[0.5], [2.5], [4.5], [10.]];
//! let ixs = cada.query(&target.view(), 2).expect("Failed to query");
//! assert_eq!(ixs.len(), 2);
//! # }
//! ```
#[cfg_attr(test, macro_use)]
extern crate ndarray;

pub mod error;
pub mod dataset;
pub mod neighbors;
pub mod complexity;
pub mod classifier;
pub mod oracle;
pub mod cada;
pub mod active;
pub mod report;
pub mod utils;

pub use crate::error::{Error, Result};
pub use crate::dataset::{Dataset, KnownSet, Label};
pub use crate::complexity::{ComplexityCurve, ComplexityEstimator};
pub use crate::classifier::Classifier;
pub use crate::oracle::{Oracle, Query, Uncertainty};
pub use crate::cada::{Cada, CadaConfig};
pub use crate::active::{ActiveLearner, Checkpoint, ExperimentConfig, RunOutcome, State,
                        Strategy};
