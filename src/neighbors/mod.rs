//! Distances and k-nearest-neighbor tables.
//!
//! A `NeighborTable` stores, for every sample of a feature matrix, the
//! indices of its `k` nearest neighbors (excluding itself) by ascending
//! distance, ties broken by index.
pub mod table;

use lazysort::Sorted;
use ndarray::prelude::*;
use ordered_float::OrderedFloat;

use crate::dataset::Label;

pub use self::table::NeighborTable;


/// Returns the Euclidean distance between two vectors of f64 values.
pub fn euclidean_distance(v1: &ArrayView1<f64>, v2: &ArrayView1<f64>) -> f64 {
    v1.iter()
      .zip(v2.iter())
      .map(|(x,y)| (x - y).powi(2))
      .sum::<f64>()
      .sqrt()
}

/// Returns the `(n, n)` matrix of Euclidean distances between the rows
/// of `inputs`.
pub fn pairwise_distances(inputs: &ArrayView2<f64>) -> Array2<f64> {
    let n = inputs.nrows();
    let mut distances = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in (i+1)..n {
            let d = euclidean_distance(&inputs.row(i), &inputs.row(j));
            distances[[i, j]] = d;
            distances[[j, i]] = d;
        }
    }

    distances
}

/// Returns the `k` rows of `inputs` closest to `x` as `(distance, index)`
/// pairs, by ascending distance and then index.
///
/// If `exclude` is `Some(i)`, row `i` is never returned; this is how a
/// point is prevented from being its own neighbor.
pub fn nearest(x: &ArrayView1<f64>, inputs: &ArrayView2<f64>, k: usize,
               exclude: Option<usize>) -> Vec<(f64, usize)> {
    inputs.outer_iter()
          .enumerate()
          .filter(|&(j, _)| Some(j) != exclude)
          .map(|(j, row)| (OrderedFloat(euclidean_distance(x, &row)), j))
          .sorted()
          .take(k)
          .map(|(d, j)| (d.into_inner(), j))
          .collect()
}

/// Returns the majority label among `labels`, which must be given
/// nearest neighbor first.
///
/// Among labels with the same number of votes, the one occurring first
/// (i.e., the one of the nearest neighbor) wins. Returns `None` if
/// `labels` is empty.
pub fn majority_vote<I>(labels: I) -> Option<Label> where I: IntoIterator<Item=Label> {
    // (label, votes, position of first occurrence)
    let mut tally: Vec<(Label, usize, usize)> = vec![];

    for (pos, y) in labels.into_iter().enumerate() {
        match tally.iter_mut().find(|t| t.0 == y) {
            Some(t) => t.1 += 1,
            None => tally.push((y, 1, pos)),
        }
    }

    tally.into_iter()
         .max_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)))
         .map(|(y, _, _)| y)
}
