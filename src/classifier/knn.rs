//! k-NN classifier.
use std::cmp::min;

use ndarray::prelude::*;

use crate::classifier::{Classifier, check_training, n_label_slots, not_fitted};
use crate::dataset::{Dataset, Label};
use crate::error::{Error, Result};
use crate::neighbors::{nearest, majority_vote};


/// A k-NN classifier with Euclidean distance.
///
/// Predictions are majority votes among the `k` nearest training
/// examples, ties going to the label of the nearest one; probabilities
/// are vote fractions.
#[derive(Clone, Debug)]
pub struct KNNClassifier {
    k: usize,
    train: Option<Dataset>,
    n_labels: usize,
}

impl KNNClassifier {
    /// Constructs a k-NN classifier.
    ///
    /// # Arguments
    ///
    /// `k` - Number of nearest neighbors; `fit()` rejects 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use cada::classifier::KNNClassifier;
    ///
    /// let k = 3;
    /// let knn = KNNClassifier::new(k);
    /// ```
    pub fn new(k: usize) -> KNNClassifier {
        KNNClassifier {
            k,
            train: None,
            n_labels: 0,
        }
    }

    /// Labels of the nearest training examples of `x`, nearest first.
    fn neighbor_labels(&self, train: &Dataset, x: &ArrayView1<f64>) -> Vec<Label> {
        let k = min(self.k, train.len());
        let targets = train.targets();

        nearest(x, &train.inputs(), k, None).into_iter()
                                            .map(|(_, j)| targets[j])
                                            .collect()
    }

    fn trained(&self, inputs: &ArrayView2<f64>) -> Result<&Dataset> {
        let train = self.train.as_ref().ok_or_else(|| not_fitted(self.name()))?;
        if inputs.ncols() != train.dim() {
            return Err(Error::invalid(format!("expected {} features, got {}",
                                              train.dim(), inputs.ncols())));
        }
        Ok(train)
    }
}

impl Classifier for KNNClassifier {
    fn name(&self) -> &str {
        "KNNClassifier"
    }

    fn fit(&mut self, inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>) -> Result<()> {
        check_training(inputs, targets)?;
        if self.k == 0 {
            return Err(Error::invalid("k-NN needs at least one neighbor"));
        }

        self.n_labels = n_label_slots(targets);
        self.train = Some(Dataset::from_views(inputs, targets)?);

        Ok(())
    }

    fn predict(&self, inputs: &ArrayView2<f64>) -> Result<Array1<Label>> {
        let train = self.trained(inputs)?;

        let preds = inputs.outer_iter()
                          .map(|x| majority_vote(self.neighbor_labels(train, &x))
                                       .ok_or_else(|| not_fitted(self.name())))
                          .collect::<Result<Vec<_>>>()?;

        Ok(Array1::from(preds))
    }

    fn predict_proba(&self, inputs: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let train = self.trained(inputs)?;
        let mut probs = Array2::<f64>::zeros((inputs.nrows(), self.n_labels));

        for (i, x) in inputs.outer_iter().enumerate() {
            let labels = self.neighbor_labels(train, &x);
            let weight = 1. / labels.len() as f64;
            for y in labels {
                probs[[i, y]] += weight;
            }
        }

        Ok(probs)
    }
}
