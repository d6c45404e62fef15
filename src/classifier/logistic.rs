//! Binary logistic regression, backed by rusty-machine.
use ndarray::prelude::*;
use rusty_machine::learning::SupModel;
use rusty_machine::learning::logistic_reg::LogisticRegressor;
use rusty_machine::learning::optim::grad_desc::GradientDesc;
use rusty_machine::linalg::{Matrix, Vector};

use crate::classifier::{Classifier, check_training, not_fitted};
use crate::dataset::Label;
use crate::error::{Error, Result};


/// Logistic regression for labels in {0, 1}, trained by gradient descent.
///
/// `predict_proba()` returns two columns, `P(y=0)` and `P(y=1)`.
#[derive(Debug)]
pub struct LogisticClassifier {
    alpha: f64,
    iters: usize,
    model: Option<LogisticRegressor<GradientDesc>>,
    dim: usize,
}

impl LogisticClassifier {
    /// Constructs a logistic regression trained with gradient descent.
    ///
    /// # Arguments
    ///
    /// * `alpha` - Learning rate; `fit()` rejects non-positive values.
    /// * `iters` - Number of gradient descent iterations.
    pub fn new(alpha: f64, iters: usize) -> LogisticClassifier {
        LogisticClassifier {
            alpha,
            iters,
            model: None,
            dim: 0,
        }
    }

    /// Returns `P(y=1)` for each input.
    fn positive_proba(&self, inputs: &ArrayView2<f64>) -> Result<Vec<f64>> {
        let model = self.model.as_ref().ok_or_else(|| not_fitted(self.name()))?;
        if inputs.ncols() != self.dim {
            return Err(Error::invalid(format!("expected {} features, got {}",
                                              self.dim, inputs.ncols())));
        }
        if inputs.nrows() == 0 {
            return Ok(vec![]);
        }

        let probs = model.predict(&to_matrix(inputs))?;
        Ok(probs.into_vec())
    }
}

impl Default for LogisticClassifier {
    fn default() -> LogisticClassifier {
        LogisticClassifier::new(0.3, 100)
    }
}

fn to_matrix(inputs: &ArrayView2<f64>) -> Matrix<f64> {
    Matrix::new(inputs.nrows(), inputs.ncols(),
                inputs.iter().cloned().collect::<Vec<_>>())
}

impl Classifier for LogisticClassifier {
    fn name(&self) -> &str {
        "LogisticClassifier"
    }

    fn fit(&mut self, inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>) -> Result<()> {
        check_training(inputs, targets)?;
        if !(self.alpha > 0.) {
            return Err(Error::invalid(format!("learning rate must be positive, got {}",
                                              self.alpha)));
        }
        if let Some(y) = targets.iter().find(|&&y| y > 1) {
            return Err(Error::invalid(format!("logistic regression is binary, got label {}", y)));
        }

        let mut model = LogisticRegressor::new(GradientDesc::new(self.alpha, self.iters));
        let targets = Vector::new(targets.iter()
                                         .map(|&y| y as f64)
                                         .collect::<Vec<_>>());
        model.train(&to_matrix(inputs), &targets)?;

        self.dim = inputs.ncols();
        self.model = Some(model);

        Ok(())
    }

    fn predict(&self, inputs: &ArrayView2<f64>) -> Result<Array1<Label>> {
        Ok(self.positive_proba(inputs)?
               .into_iter()
               .map(|p| if p >= 0.5 { 1 } else { 0 })
               .collect())
    }

    fn predict_proba(&self, inputs: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let positive = self.positive_proba(inputs)?;
        let mut probs = Array2::<f64>::zeros((positive.len(), 2));
        for (i, p) in positive.into_iter().enumerate() {
            probs[[i, 0]] = 1. - p;
            probs[[i, 1]] = p;
        }

        Ok(probs)
    }
}
