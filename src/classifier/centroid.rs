//! Nearest centroid classifier.
use ndarray::prelude::*;

use crate::classifier::{Classifier, check_training, not_fitted};
use crate::dataset::{Label, distinct_labels};
use crate::error::{Error, Result};
use crate::neighbors::euclidean_distance;


/// Assigns each input the label of the closest class centroid.
///
/// It has no probabilistic output: its decision values are the negated
/// distances to the centroids, one column per label seen in training
/// (ascending label order).
#[derive(Clone, Debug, Default)]
pub struct NearestCentroid {
    labels: Vec<Label>,
    // One row per entry of `labels`.
    centroids: Option<Array2<f64>>,
}

impl NearestCentroid {
    pub fn new() -> NearestCentroid {
        NearestCentroid::default()
    }

    /// Labels matching the columns of `decision_function()`.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

impl Classifier for NearestCentroid {
    fn name(&self) -> &str {
        "NearestCentroid"
    }

    fn fit(&mut self, inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>) -> Result<()> {
        check_training(inputs, targets)?;

        let labels = distinct_labels(targets);
        let mut centroids = Array2::<f64>::zeros((labels.len(), inputs.ncols()));

        for (c, &y) in labels.iter().enumerate() {
            let rows = targets.iter()
                              .enumerate()
                              .filter(|&(_, t)| *t == y)
                              .map(|(i, _)| i)
                              .collect::<Vec<_>>();
            let mean = inputs.select(Axis(0), &rows)
                             .mean_axis(Axis(0))
                             .ok_or_else(|| Error::invalid("empty class"))?;
            centroids.row_mut(c).assign(&mean);
        }

        self.labels = labels;
        self.centroids = Some(centroids);

        Ok(())
    }

    fn predict(&self, inputs: &ArrayView2<f64>) -> Result<Array1<Label>> {
        let decision = self.decision_function(inputs)?;

        Ok(decision.outer_iter()
                   .map(|row| {
                       // First maximum, so ties go to the smallest label.
                       let best = row.iter()
                                     .enumerate()
                                     .fold(0, |best, (c, &v)| if v > row[best] { c } else { best });
                       self.labels[best]
                   })
                   .collect())
    }

    fn decision_function(&self, inputs: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let centroids = self.centroids.as_ref().ok_or_else(|| not_fitted(self.name()))?;
        if inputs.ncols() != centroids.ncols() {
            return Err(Error::invalid(format!("expected {} features, got {}",
                                              centroids.ncols(), inputs.ncols())));
        }

        let mut decision = Array2::<f64>::zeros((inputs.nrows(), centroids.nrows()));
        for (i, x) in inputs.outer_iter().enumerate() {
            for (c, centroid) in centroids.outer_iter().enumerate() {
                decision[[i, c]] = -euclidean_distance(&x, &centroid);
            }
        }

        Ok(decision)
    }
}
