//! Classifiers consumed by the active-learning loop.
//!
//! A `Classifier` can always be fit, predict labels and be scored;
//! on top of that it may provide class probabilities (`predict_proba`)
//! and/or per-class decision values (`decision_function`). The default
//! implementations of these two report the capability as missing.
pub mod knn;
pub mod centroid;
pub mod logistic;

use ndarray::prelude::*;

use crate::dataset::Label;
use crate::error::{Error, Result};

pub use self::knn::KNNClassifier;
pub use self::centroid::NearestCentroid;
pub use self::logistic::LogisticClassifier;


/// A trainable classifier over `f64` feature vectors.
pub trait Classifier {
    /// Human readable name, used in logs and errors.
    fn name(&self) -> &str;

    /// Trains the model, discarding any previous training.
    fn fit(&mut self, inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>) -> Result<()>;

    /// Predicts a label for each input.
    fn predict(&self, inputs: &ArrayView2<f64>) -> Result<Array1<Label>>;

    /// Returns the mean accuracy on the given inputs and labels.
    fn score(&self, inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>) -> Result<f64> {
        if inputs.nrows() != targets.len() {
            return Err(Error::invalid(format!("{} inputs but {} labels",
                                              inputs.nrows(), targets.len())));
        }
        if targets.is_empty() {
            return Err(Error::invalid("cannot score on an empty set"));
        }
        let preds = self.predict(inputs)?;
        let correct = preds.iter()
                           .zip(targets.iter())
                           .filter(|&(p, y)| p == y)
                           .count();

        Ok(correct as f64 / targets.len() as f64)
    }

    /// Returns a `(n_inputs, n_labels)` matrix of class probabilities.
    fn predict_proba(&self, _inputs: &ArrayView2<f64>) -> Result<Array2<f64>> {
        Err(Error::UnsupportedModel { model: self.name().to_string(),
                                      capability: "predict_proba" })
    }

    /// Returns a matrix of decision values, where larger means more
    /// confident. Binary models may return a single column (the signed
    /// margin), multiclass ones one column per label.
    fn decision_function(&self, _inputs: &ArrayView2<f64>) -> Result<Array2<f64>> {
        Err(Error::UnsupportedModel { model: self.name().to_string(),
                                      capability: "decision_function" })
    }
}

/// Returns the number of label slots needed for `targets`
/// (largest label plus one).
pub(crate) fn n_label_slots(targets: &ArrayView1<Label>) -> usize {
    targets.iter()
           .max()
           .map_or(0, |y| y + 1)
}

/// Checks the shape of training data shared by all classifiers.
pub(crate) fn check_training(inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>)
        -> Result<()> {
    if inputs.nrows() != targets.len() {
        return Err(Error::invalid(format!("{} inputs but {} labels",
                                          inputs.nrows(), targets.len())));
    }
    if targets.is_empty() {
        return Err(Error::invalid("cannot fit on an empty training set"));
    }
    Ok(())
}

/// Returns an `InvalidInput` error for a model used before `fit()`.
pub(crate) fn not_fitted(name: &str) -> Error {
    Error::invalid(format!("model `{}` must be fit before use", name))
}
