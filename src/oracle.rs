//! Simulated labeling oracle.
//!
//! An `Oracle` holds a target dataset whose labels are hidden. Labels
//! are revealed one at a time, each index at most once, either at random,
//! by uncertainty sampling, or explicitly by index.
//!
//! Every query returns a `Query` carrying the revealed index, its feature
//! vector and its label, whatever the strategy.
use log::trace;
use ndarray::prelude::*;
use ordered_float::OrderedFloat;
use pcg_rand::Pcg32;
use rand::{Rng, SeedableRng};

use crate::classifier::Classifier;
use crate::dataset::{Dataset, Label};
use crate::error::{Error, Result};

/// Seed used by `Oracle::new()`.
pub const DEFAULT_SEED: u64 = 0;


/// A revealed target example.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub index: usize,
    pub label: Label,
    pub features: Array1<f64>,
}

/// How uncertain a model is about a prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Uncertainty {
    /// Negated gap between the two highest class scores. Works with both
    /// probabilities and decision values.
    Margin,
    /// Entropy of the predicted class distribution. Needs probabilities;
    /// falls back to `Margin` for models only providing decision values.
    Entropy,
}

impl Default for Uncertainty {
    fn default() -> Uncertainty {
        Uncertainty::Margin
    }
}

/// Simulated labeling service over a target dataset.
pub struct Oracle {
    dataset: Dataset,
    revealed: Vec<bool>,
    n_revealed: usize,
    rng: Pcg32,
}

impl Oracle {
    /// Constructs an oracle with the default PRNG seed.
    ///
    /// # Examples
    ///
    /// ```
    /// #[macro_use(array)]
    /// extern crate ndarray;
    /// extern crate cada;
    ///
    /// # fn main() {
    /// use cada::Oracle;
    ///
    /// let inputs = array![[0., 0.], [1., 1.]];
    /// let targets = array![0, 1];
    /// let mut oracle = Oracle::new(&inputs.view(), &targets.view())
    ///                         .expect("Invalid dataset");
    ///
    /// let q = oracle.random_query().expect("Oracle exhausted");
    /// assert_eq!(q.label, targets[q.index]);
    /// assert_eq!(oracle.remaining(), 1);
    /// # }
    /// ```
    pub fn new(inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>) -> Result<Oracle> {
        Oracle::with_seed(inputs, targets, DEFAULT_SEED)
    }

    /// Constructs an oracle whose random queries are driven by a PRNG
    /// seeded with `seed`.
    pub fn with_seed(inputs: &ArrayView2<f64>, targets: &ArrayView1<Label>,
                     seed: u64) -> Result<Oracle> {
        let dataset = Dataset::from_views(inputs, targets)?;
        Ok(Oracle::from_dataset(dataset, seed))
    }

    /// Constructs an oracle taking ownership of the target dataset.
    pub fn from_dataset(dataset: Dataset, seed: u64) -> Oracle {
        Oracle {
            revealed: vec![false; dataset.len()],
            n_revealed: 0,
            dataset,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Number of target examples.
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Number of labels still hidden.
    pub fn remaining(&self) -> usize {
        self.dataset.len() - self.n_revealed
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).cloned().unwrap_or(false)
    }

    /// Target inputs; these are not hidden.
    pub fn inputs(&self) -> ArrayView2<f64> {
        self.dataset.inputs()
    }

    /// Indices not yet revealed, ascending.
    pub fn unrevealed(&self) -> Vec<usize> {
        self.revealed.iter()
                     .enumerate()
                     .filter(|&(_, r)| !r)
                     .map(|(i, _)| i)
                     .collect()
    }

    /// Reveals a uniformly random index among those not yet revealed.
    ///
    /// # Errors
    ///
    /// `Error::ExhaustedOracle` if every index was already revealed.
    pub fn random_query(&mut self) -> Result<Query> {
        let candidates = self.candidates()?;
        let index = candidates[self.rng.gen_range(0..candidates.len())];
        trace!("random query: index {} ({} candidates)", index, candidates.len());

        Ok(self.mark(index))
    }

    /// Reveals the index the model is most uncertain about, using the
    /// margin between its two highest class scores.
    ///
    /// See `uncertainty_sampling_with()`.
    pub fn uncertainty_sampling<C>(&mut self, model: &C) -> Result<Query>
            where C: Classifier + ?Sized {
        self.uncertainty_sampling_with(model, Uncertainty::Margin)
    }

    /// Reveals the index the model is most uncertain about.
    ///
    /// Only indices not yet revealed are considered; ties go to the
    /// lowest index. Probabilities are used when the model provides them,
    /// otherwise decision values.
    ///
    /// # Errors
    ///
    /// * `Error::ExhaustedOracle` if every index was already revealed.
    /// * `Error::UnsupportedModel` if the model provides neither
    ///   probabilities nor decision values.
    pub fn uncertainty_sampling_with<C>(&mut self, model: &C, measure: Uncertainty)
            -> Result<Query> where C: Classifier + ?Sized {
        let candidates = self.candidates()?;
        let inputs = self.dataset.inputs().select(Axis(0), &candidates);
        let scores = uncertainty_scores(model, &inputs.view(), measure)?;

        let best = candidates.iter()
                             .zip(scores.iter())
                             .map(|(&i, &u)| {
                                 let u = if u.is_nan() { f64::NEG_INFINITY } else { u };
                                 (OrderedFloat(u), i)
                             })
                             .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
                             .map(|(_, i)| i)
                             .ok_or(Error::ExhaustedOracle { revealed: self.n_revealed })?;
        trace!("uncertainty query: index {} ({} candidates)", best, candidates.len());

        Ok(self.mark(best))
    }

    /// Reveals a given index.
    ///
    /// # Errors
    ///
    /// * `Error::ExhaustedOracle` if every index was already revealed.
    /// * `Error::InvalidInput` if `index` is out of range or was already
    ///   revealed.
    pub fn reveal(&mut self, index: usize) -> Result<Query> {
        self.candidates()?;
        if index >= self.len() {
            return Err(Error::invalid(format!("index {} out of range for {} targets",
                                              index, self.len())));
        }
        if self.revealed[index] {
            return Err(Error::invalid(format!("index {} already revealed", index)));
        }
        trace!("explicit query: index {}", index);

        Ok(self.mark(index))
    }

    fn candidates(&self) -> Result<Vec<usize>> {
        if self.remaining() == 0 {
            return Err(Error::ExhaustedOracle { revealed: self.n_revealed });
        }
        Ok(self.unrevealed())
    }

    fn mark(&mut self, index: usize) -> Query {
        debug_assert!(!self.revealed[index]);
        self.revealed[index] = true;
        self.n_revealed += 1;

        Query {
            index,
            label: self.dataset.targets()[index],
            features: self.dataset.inputs().row(index).to_owned(),
        }
    }
}

/// Computes the uncertainty of a model on each input; higher means more
/// uncertain.
pub fn uncertainty_scores<C>(model: &C, inputs: &ArrayView2<f64>, measure: Uncertainty)
        -> Result<Vec<f64>> where C: Classifier + ?Sized {
    match model.predict_proba(inputs) {
        Ok(probs) => {
            Ok(probs.outer_iter()
                    .map(|p| match measure {
                        Uncertainty::Margin => -top_two_gap(&p),
                        Uncertainty::Entropy => entropy(&p),
                    })
                    .collect())
        },
        Err(Error::UnsupportedModel { .. }) => {
            let decision = match model.decision_function(inputs) {
                Ok(decision) => decision,
                Err(Error::UnsupportedModel { model, .. }) => {
                    return Err(Error::UnsupportedModel {
                        model,
                        capability: "predict_proba or decision_function",
                    });
                },
                Err(e) => return Err(e),
            };
            Ok(decision.outer_iter()
                       .map(|d| if d.len() == 1 { -d[0].abs() } else { -top_two_gap(&d) })
                       .collect())
        },
        Err(e) => Err(e),
    }
}

/// Difference between the two largest values (0 for fewer than 2).
fn top_two_gap(values: &ArrayView1<f64>) -> f64 {
    let mut first = f64::NEG_INFINITY;
    let mut second = f64::NEG_INFINITY;
    for &v in values {
        if v > first {
            second = first;
            first = v;
        } else if v > second {
            second = v;
        }
    }
    if second == f64::NEG_INFINITY {
        0.
    } else {
        first - second
    }
}

/// Shannon entropy (nats) of a probability vector.
fn entropy(probs: &ArrayView1<f64>) -> f64 {
    probs.iter()
         .filter(|&&p| p > 0.)
         .map(|&p| -p * p.ln())
         .sum()
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::classifier::{KNNClassifier, NearestCentroid};

    /// Model returning fixed probabilities, one row per target.
    struct FixedProba(Array2<f64>);

    impl Classifier for FixedProba {
        fn name(&self) -> &str { "FixedProba" }
        fn fit(&mut self, _: &ArrayView2<f64>, _: &ArrayView1<Label>) -> Result<()> { Ok(()) }
        fn predict(&self, inputs: &ArrayView2<f64>) -> Result<Array1<Label>> {
            Ok(Array1::zeros(inputs.nrows()))
        }
        // Rows are looked up by the first feature.
        fn predict_proba(&self, inputs: &ArrayView2<f64>) -> Result<Array2<f64>> {
            let rows = inputs.column(0).iter().map(|&x| x as usize).collect::<Vec<_>>();
            Ok(self.0.select(Axis(0), &rows))
        }
    }

    struct LabelsOnly;

    impl Classifier for LabelsOnly {
        fn name(&self) -> &str { "LabelsOnly" }
        fn fit(&mut self, _: &ArrayView2<f64>, _: &ArrayView1<Label>) -> Result<()> { Ok(()) }
        fn predict(&self, inputs: &ArrayView2<f64>) -> Result<Array1<Label>> {
            Ok(Array1::zeros(inputs.nrows()))
        }
    }

    fn targets() -> (Array2<f64>, Array1<Label>) {
        (array![[0.], [1.], [2.], [3.]], array![1, 0, 1, 0])
    }

    #[test]
    fn random_without_replacement() {
        let (inputs, labels) = targets();
        let mut oracle = Oracle::with_seed(&inputs.view(), &labels.view(), 42).unwrap();
        let mut seen = HashSet::new();

        for _ in 0..4 {
            let q = oracle.random_query().unwrap();
            assert!(seen.insert(q.index));
            assert_eq!(q.label, labels[q.index]);
            assert_eq!(q.features, inputs.row(q.index));
        }
        match oracle.random_query() {
            Err(Error::ExhaustedOracle { revealed: 4 }) => {},
            _ => panic!("Expected ExhaustedOracle"),
        }
    }

    #[test]
    fn seeded() {
        let (inputs, labels) = targets();
        let order = |seed| {
            let mut oracle = Oracle::with_seed(&inputs.view(), &labels.view(), seed)
                                    .unwrap();
            (0..4).map(|_| oracle.random_query().unwrap().index)
                  .collect::<Vec<_>>()
        };
        assert_eq!(order(7), order(7));
    }

    #[test]
    fn margin_and_entropy() {
        let (inputs, labels) = targets();
        let model = FixedProba(array![[0.9, 0.05, 0.05],
                                      [0.5, 0.5, 0.],
                                      [0.4, 0.3, 0.3],
                                      [0.5, 0.5, 0.]]);

        let mut oracle = Oracle::new(&inputs.view(), &labels.view()).unwrap();
        // Indices 1 and 3 have zero margin: lowest index first.
        assert_eq!(oracle.uncertainty_sampling(&model).unwrap().index, 1);
        assert_eq!(oracle.uncertainty_sampling(&model).unwrap().index, 3);
        assert_eq!(oracle.uncertainty_sampling(&model).unwrap().index, 2);
        assert_eq!(oracle.uncertainty_sampling(&model).unwrap().index, 0);
        assert!(oracle.uncertainty_sampling(&model).is_err());

        let mut oracle = Oracle::new(&inputs.view(), &labels.view()).unwrap();
        let q = oracle.uncertainty_sampling_with(&model, Uncertainty::Entropy).unwrap();
        assert_eq!(q.index, 2);
        assert_eq!(q.label, 1);
    }

    #[test]
    fn decision_function_fallback() {
        let mut model = NearestCentroid::new();
        model.fit(&array![[0.], [4.]].view(), &array![0, 1].view()).unwrap();

        let inputs = array![[0.], [1.5], [2.5], [4.]];
        let mut oracle = Oracle::new(&inputs.view(), &array![0, 0, 1, 1].view()).unwrap();

        // 1.5 and 2.5 are equally far from the boundary at 2.
        assert_eq!(oracle.uncertainty_sampling(&model).unwrap().index, 1);
        assert_eq!(oracle.uncertainty_sampling(&model).unwrap().index, 2);
    }

    #[test]
    fn never_revealed_twice() {
        let inputs = array![[0.], [1.], [2.], [3.], [4.]];
        let labels = array![0, 0, 1, 1, 1];
        let mut model = KNNClassifier::new(2);
        model.fit(&inputs.view(), &labels.view()).unwrap();

        let mut oracle = Oracle::new(&inputs.view(), &labels.view()).unwrap();
        oracle.random_query().unwrap();
        let mut seen = (0..5).filter(|&i| oracle.is_revealed(i)).collect::<HashSet<_>>();
        for _ in 0..4 {
            let q = oracle.uncertainty_sampling(&model).unwrap();
            assert!(seen.insert(q.index));
        }
        assert_eq!(oracle.remaining(), 0);
    }

    #[test]
    fn unsupported_model() {
        let (inputs, labels) = targets();
        let mut oracle = Oracle::new(&inputs.view(), &labels.view()).unwrap();

        match oracle.uncertainty_sampling(&LabelsOnly) {
            Err(Error::UnsupportedModel { .. }) => {},
            _ => panic!("Expected UnsupportedModel"),
        }
        // Nothing was revealed.
        assert_eq!(oracle.remaining(), 4);
    }

    #[test]
    fn explicit_reveal() {
        let (inputs, labels) = targets();
        let mut oracle = Oracle::new(&inputs.view(), &labels.view()).unwrap();

        assert_eq!(oracle.reveal(2).unwrap().label, 1);
        assert!(oracle.reveal(2).is_err());
        assert!(oracle.reveal(9).is_err());
        assert_eq!(oracle.unrevealed(), vec![0, 1, 3]);
    }
}
