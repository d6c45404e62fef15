//! Precomputed k-nearest-neighbor table.
use lazysort::Sorted;
use ndarray::prelude::*;
use ordered_float::OrderedFloat;

use crate::error::{Error, Result};
use crate::neighbors::pairwise_distances;


/// For each sample, its `k` nearest neighbors (the sample itself excluded)
/// by ascending distance, ties broken by index.
#[derive(Clone, Debug)]
pub struct NeighborTable {
    k: usize,
    // Row i holds the neighbor indices of sample i.
    indices: Array2<usize>,
    // Matching distances, same shape as `indices`.
    distances: Array2<f64>,
}

impl NeighborTable {
    /// Builds the table for neighborhoods of up to `k` samples.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Matrix with one sample per row.
    /// * `k` - Maximum neighborhood size; must satisfy `1 <= k <= n-1`.
    ///
    /// # Examples
    ///
    /// ```
    /// #[macro_use(array)]
    /// extern crate ndarray;
    /// extern crate cada;
    ///
    /// # fn main() {
    /// use cada::neighbors::NeighborTable;
    ///
    /// let inputs = array![[0.], [1.], [3.]];
    /// let table = NeighborTable::new(&inputs.view(), 2)
    ///                           .expect("Failed to build table");
    /// assert_eq!(table.neighbors(2).to_vec(), vec![1, 0]);
    /// # }
    /// ```
    pub fn new(inputs: &ArrayView2<f64>, k: usize) -> Result<NeighborTable> {
        let n = inputs.nrows();

        if n < 2 {
            return Err(Error::invalid(format!("need at least 2 samples, got {}", n)));
        }
        if k == 0 || k >= n {
            return Err(Error::invalid(format!("neighborhood size must be in [1, {}], got {}",
                                              n - 1, k)));
        }

        let all_distances = pairwise_distances(inputs);
        let mut indices = Array2::<usize>::zeros((n, k));
        let mut distances = Array2::<f64>::zeros((n, k));

        for (i, row) in all_distances.outer_iter().enumerate() {
            let nearest = row.iter()
                             .enumerate()
                             .filter(|&(j, _)| j != i)
                             .map(|(j, d)| (OrderedFloat(*d), j))
                             .sorted()
                             .take(k);
            for (r, (d, j)) in nearest.enumerate() {
                indices[[i, r]] = j;
                distances[[i, r]] = d.into_inner();
            }
        }

        Ok(NeighborTable { k, indices, distances })
    }

    /// Maximum neighborhood size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.indices.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.nrows() == 0
    }

    /// Neighbor indices of sample `i`, nearest first.
    pub fn neighbors(&self, i: usize) -> ArrayView1<usize> {
        self.indices.row(i)
    }

    /// Distances from sample `i` to its neighbors, nearest first.
    pub fn distances(&self, i: usize) -> ArrayView1<f64> {
        self.distances.row(i)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table() {
        let inputs = array![[0., 0.],
                            [1., 0.],
                            [0., 2.],
                            [4., 0.]];
        let table = NeighborTable::new(&inputs.view(), 2).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.neighbors(0).to_vec(), vec![1, 2]);
        assert_eq!(table.neighbors(1).to_vec(), vec![0, 2]);
        assert_eq!(table.neighbors(2).to_vec(), vec![0, 1]);
        assert_eq!(table.neighbors(3).to_vec(), vec![1, 0]);
        assert_eq!(table.distances(3).to_vec(), vec![3., 4.]);
    }

    /// A point is never its own neighbor, even with duplicates.
    #[test]
    fn duplicates() {
        let inputs = array![[1.], [1.], [1.]];
        let table = NeighborTable::new(&inputs.view(), 2).unwrap();

        for i in 0..3 {
            assert!(!table.neighbors(i).iter().any(|&j| j == i));
        }
        assert_eq!(table.neighbors(1).to_vec(), vec![0, 2]);
    }

    #[test]
    fn invalid_k() {
        let inputs = array![[0.], [1.], [2.]];
        assert!(NeighborTable::new(&inputs.view(), 3).is_err());
        assert!(NeighborTable::new(&inputs.view(), 0).is_err());
        assert!(NeighborTable::new(&array![[0.]].view(), 1).is_err());
    }
}
