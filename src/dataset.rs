//! Labeled datasets and the growing set of known examples of an
//! active-learning run.
use itertools::Itertools;
use ndarray::prelude::*;

use crate::error::{Error, Result};

/// Class label. Labels are small non-negative integers.
pub type Label = usize;

/// An immutable pair of feature matrix (one row per sample) and
/// label vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    inputs: Array2<f64>,
    targets: Array1<Label>,
}

impl Dataset {
    /// Constructs a dataset, checking that there is one label per row.
    ///
    /// # Examples
    ///
    /// ```
    /// #[macro_use(array)]
    /// extern crate ndarray;
    /// extern crate cada;
    ///
    /// # fn main() {
    /// use cada::Dataset;
    ///
    /// let ds = Dataset::new(array![[0., 0.], [1., 1.]], array![0, 1])
    ///                  .expect("Invalid dataset");
    /// assert_eq!(ds.len(), 2);
    /// assert_eq!(ds.dim(), 2);
    /// # }
    /// ```
    pub fn new(inputs: Array2<f64>, targets: Array1<Label>) -> Result<Dataset> {
        if inputs.nrows() != targets.len() {
            return Err(Error::invalid(format!("{} inputs but {} labels",
                                              inputs.nrows(), targets.len())));
        }
        Ok(Dataset { inputs, targets })
    }

    /// Constructs a dataset by copying views.
    pub fn from_views(inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>)
            -> Result<Dataset> {
        Dataset::new(inputs.to_owned(), targets.to_owned())
    }

    pub fn inputs(&self) -> ArrayView2<f64> {
        self.inputs.view()
    }

    pub fn targets(&self) -> ArrayView1<Label> {
        self.targets.view()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of features.
    pub fn dim(&self) -> usize {
        self.inputs.ncols()
    }

    /// Distinct labels, sorted.
    pub fn labels(&self) -> Vec<Label> {
        distinct_labels(&self.targets.view())
    }
}

/// Returns the sorted distinct labels of `targets`.
pub fn distinct_labels(targets: &ArrayView1<Label>) -> Vec<Label> {
    targets.iter()
           .cloned()
           .unique()
           .sorted()
           .collect()
}

/// Examples whose labels are known to the learner.
///
/// It starts as a copy of the source dataset and grows by one
/// example per active-learning query.
#[derive(Clone, Debug)]
pub struct KnownSet {
    inputs: Array2<f64>,
    targets: Vec<Label>,
}

impl KnownSet {
    /// Starts a known set from a (fully labeled) dataset.
    pub fn from_dataset(dataset: &Dataset) -> KnownSet {
        KnownSet {
            inputs: dataset.inputs.clone(),
            targets: dataset.targets.to_vec(),
        }
    }

    /// Appends one labeled example.
    pub fn push(&mut self, x: &ArrayView1<f64>, y: Label) -> Result<()> {
        if x.len() != self.inputs.ncols() {
            return Err(Error::invalid(format!("expected {} features, got {}",
                                              self.inputs.ncols(), x.len())));
        }
        self.inputs.push_row(x.view())?;
        self.targets.push(y);

        Ok(())
    }

    pub fn inputs(&self) -> ArrayView2<f64> {
        self.inputs.view()
    }

    pub fn targets(&self) -> ArrayView1<Label> {
        ArrayView1::from(&self.targets[..])
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Consumes the known set, returning it as a dataset.
    pub fn into_dataset(self) -> Dataset {
        Dataset {
            inputs: self.inputs,
            targets: Array1::from(self.targets),
        }
    }
}
