//! Flat records handed to the plotting layer.
use serde_derive::Serialize;

use crate::active::Checkpoint;
use crate::complexity::ComplexityEstimator;


/// One point of a complexity curve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurveRecord {
    pub k: usize,
    pub error: f64,
}

/// Accuracy of the active classifier at a checkpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckpointRecord {
    pub queries: usize,
    pub score: f64,
}

/// Returns the complexity curve of an estimator as records.
pub fn curve_records(estimator: &ComplexityEstimator) -> Vec<CurveRecord> {
    estimator.get_k_complexity()
             .points()
             .map(|(k, error)| CurveRecord { k, error })
             .collect()
}

pub fn checkpoint_records(checkpoints: &[Checkpoint]) -> Vec<CheckpointRecord> {
    checkpoints.iter()
               .map(|c| CheckpointRecord { queries: c.queries, score: c.score })
               .collect()
}
