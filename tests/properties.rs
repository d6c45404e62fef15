//! Properties of the estimator, oracle and CADA selector that hold for
//! any labeled dataset.
extern crate cada;
extern crate ndarray;
extern crate proptest;

use std::collections::HashSet;

use cada::{Cada, ComplexityEstimator, Error, Label, Oracle};
use ndarray::prelude::*;
use proptest::prelude::*;


/// A 2-D dataset of 4 to 30 samples with labels in {0, 1, 2}, both 0 and
/// 1 always present.
fn dataset_strategy() -> impl Strategy<Value = (Array2<f64>, Array1<Label>)> {
    (4usize..30).prop_flat_map(|n| {
        (prop::collection::vec(-10.0f64..10.0, 2 * n),
         prop::collection::vec(0usize..3, n))
    })
    .prop_map(|(values, mut labels)| {
        labels[0] = 0;
        labels[1] = 1;
        let n = labels.len();
        let inputs = Array::from_shape_vec((n, 2), values).expect("2 values per sample");
        (inputs, Array::from_vec(labels))
    })
}

fn points_strategy(max_n: usize) -> impl Strategy<Value = Array2<f64>> {
    (1..max_n).prop_flat_map(|n| prop::collection::vec(-12.0f64..12.0, 2 * n))
              .prop_map(|values| {
                  let n = values.len() / 2;
                  Array::from_shape_vec((n, 2), values).expect("2 values per point")
              })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn curve_is_well_formed((inputs, targets) in dataset_strategy(),
                            n_windows in 1usize..12,
                            nk_frac in 0.0f64..1.0) {
        let n = targets.len();
        let nk = 1 + ((n - 2) as f64 * nk_frac) as usize;
        let est = ComplexityEstimator::new(&inputs.view(), &targets.view(), n_windows, nk)
                                      .expect("valid parameters");

        let curve = est.get_k_complexity();
        prop_assert!(!curve.is_empty() && curve.len() <= n_windows);
        prop_assert!(curve.ks().windows(2).all(|w| w[0] < w[1]));
        prop_assert!(curve.ks().iter().all(|&k| k >= 1 && k <= nk));
        prop_assert!(curve.errors().iter().all(|&e| e >= 0. && e <= 1.));
        prop_assert!(est.auc() >= 0. && est.auc() <= 1.);

        let seeds = est.seeds();
        prop_assert!(!seeds.is_empty() && seeds.len() <= n_windows);
        prop_assert!(seeds.iter().all(|&i| i < n));
        prop_assert_eq!(seeds.iter().collect::<HashSet<_>>().len(), seeds.len());

        prop_assert!(est.local_complexity().iter().all(|&c| c >= 0. && c <= 1.));
    }

    #[test]
    fn oracle_reveals_each_index_once((inputs, targets) in dataset_strategy(),
                                      seed in any::<u64>()) {
        let n = targets.len();
        let mut oracle = Oracle::with_seed(&inputs.view(), &targets.view(), seed)
                                .expect("valid dataset");

        let mut revealed = HashSet::new();
        for _ in 0..n {
            let q = oracle.random_query().expect("not exhausted");
            prop_assert_eq!(q.label, targets[q.index]);
            prop_assert!(revealed.insert(q.index));
        }
        prop_assert_eq!(oracle.remaining(), 0);
        let exhausted = match oracle.random_query() {
            Err(Error::ExhaustedOracle { revealed }) => revealed == n,
            _ => false,
        };
        prop_assert!(exhausted);
    }

    #[test]
    fn cada_queries_are_distinct((inputs, targets) in dataset_strategy(),
                                 target in points_strategy(25),
                                 frac in 0.0f64..=1.0) {
        let m = target.nrows();
        let budget = (m as f64 * frac) as usize;
        let cada = Cada::new(&inputs.view(), &targets.view()).expect("valid source");

        let ixs = cada.query(&target.view(), budget).expect("valid query");
        prop_assert_eq!(ixs.len(), budget);
        prop_assert!(ixs.iter().all(|&i| i < m));
        prop_assert_eq!(ixs.iter().collect::<HashSet<_>>().len(), budget);

        prop_assert_eq!(cada.query(&target.view(), budget).expect("valid query"), ixs);
        prop_assert!(cada.query(&target.view(), m + 1).is_err());
    }
}
