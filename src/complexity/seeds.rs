//! Seed selection.
//!
//! Samples are sorted by local complexity (ties by index) and split into
//! contiguous groups, one per window; a `SeedSelector` then picks the
//! representative of each group.
use std::ops::Range;

use ndarray::prelude::*;
use ordered_float::OrderedFloat;

use crate::neighbors::NeighborTable;


/// A group of samples with similar local complexity.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedWindow<'a> {
    /// Position of the group, from least to most complex.
    pub position: usize,
    /// Sample indices in the group, by ascending (complexity, index).
    pub members: &'a [usize],
    /// Smallest local complexity in the group.
    pub lower: f64,
    /// Largest local complexity in the group.
    pub upper: f64,
}

/// Picks the representative sample of a window.
pub trait SeedSelector: Send + Sync {
    /// Returns the chosen member of `window`, or `None` to skip it.
    ///
    /// # Arguments
    ///
    /// * `window` - The group of samples.
    /// * `complexity` - Local complexity of every sample of the dataset.
    /// * `table` - Neighbor table of the dataset.
    fn select(&self, window: &SeedWindow, complexity: &ArrayView1<f64>,
              table: &NeighborTable) -> Option<usize>;
}

/// Selects the member whose complexity is closest to the window's
/// upper boundary; ties go to the lowest index.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundarySeed;

impl SeedSelector for BoundarySeed {
    fn select(&self, window: &SeedWindow, complexity: &ArrayView1<f64>,
              _table: &NeighborTable) -> Option<usize> {
        window.members
              .iter()
              .min_by_key(|&&i| (OrderedFloat((window.upper - complexity[i]).abs()), i))
              .cloned()
    }
}

/// Selects the member lying in the densest region, i.e., the one with
/// the smallest mean distance to its neighbors; ties go to the lowest
/// index.
#[derive(Clone, Copy, Debug, Default)]
pub struct DensestSeed;

impl SeedSelector for DensestSeed {
    fn select(&self, window: &SeedWindow, _complexity: &ArrayView1<f64>,
              table: &NeighborTable) -> Option<usize> {
        window.members
              .iter()
              .min_by_key(|&&i| (OrderedFloat(table.distances(i).mean().unwrap_or(0.)), i))
              .cloned()
    }
}

/// Splits `n` items into at most `n_windows` contiguous, non-empty
/// ranges whose sizes differ by at most one.
pub fn window_ranges(n: usize, n_windows: usize) -> Vec<Range<usize>> {
    if n_windows == 0 {
        return vec![];
    }
    let base = n / n_windows;
    let rem = n % n_windows;

    let mut ranges = Vec::with_capacity(n_windows);
    let mut start = 0;
    for w in 0..n_windows {
        let size = base + if w < rem { 1 } else { 0 };
        if size == 0 {
            break;
        }
        ranges.push(start..start+size);
        start += size;
    }

    ranges
}

/// Returns the sample indices sorted by ascending (complexity, index).
pub fn sort_by_complexity(complexity: &ArrayView1<f64>) -> Vec<usize> {
    let mut order = (0..complexity.len()).collect::<Vec<_>>();
    order.sort_by_key(|&i| (OrderedFloat(complexity[i]), i));
    order
}
