extern crate cada;
extern crate ndarray;
extern crate pcg_rand;
extern crate rand;

use std::collections::HashSet;

use cada::*;
use ndarray::prelude::*;
use pcg_rand::Pcg32;
use rand::{Rng, SeedableRng};


/// `n` points in [0, 4]^2, labeled by the sign of `x0 - x1` with noise
/// near the diagonal.
fn domain(n: usize, seed: u64) -> (Array2<f64>, Array1<Label>) {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut inputs = Array2::<f64>::zeros((n, 2));
    let mut targets = Array1::<Label>::zeros(n);

    for i in 0..n {
        let x0 = 4. * rng.gen::<f64>();
        let x1 = 4. * rng.gen::<f64>();
        let noise = 0.5 * (rng.gen::<f64>() - 0.5);
        inputs[[i, 0]] = x0;
        inputs[[i, 1]] = x1;
        targets[i] = if x0 - x1 + noise > 0. { 1 } else { 0 };
    }
    // Both labels must be present.
    targets[0] = 0;
    targets[1] = 1;

    (inputs, targets)
}

#[test]
fn five_of_twenty() {
    let (src_inputs, src_targets) = domain(40, 0);
    let (tgt_inputs, _) = domain(20, 1);

    let cada = Cada::new(&src_inputs.view(), &src_targets.view())
                    .expect("Failed to fit the source model");
    let ixs = cada.query(&tgt_inputs.view(), 5).expect("Failed to query");

    assert_eq!(ixs.len(), 5);
    assert!(ixs.iter().all(|&i| i < 20));
    assert_eq!(ixs.iter().collect::<HashSet<_>>().len(), 5);
}

#[test]
fn deterministic() {
    let (src_inputs, src_targets) = domain(40, 2);
    let (tgt_inputs, _) = domain(30, 3);

    let cada = Cada::new(&src_inputs.view(), &src_targets.view()).unwrap();
    let first = cada.query(&tgt_inputs.view(), 12).unwrap();
    let second = cada.query(&tgt_inputs.view(), 12).unwrap();
    assert_eq!(first, second);

    // A fresh selector on the same source agrees too.
    let again = Cada::new(&src_inputs.view(), &src_targets.view()).unwrap();
    assert_eq!(again.query(&tgt_inputs.view(), 12).unwrap(), first);
}

/// Smaller budgets return prefixes of larger ones.
#[test]
fn ranking_prefixes() {
    let (src_inputs, src_targets) = domain(40, 4);
    let (tgt_inputs, _) = domain(25, 5);
    let cada = Cada::new(&src_inputs.view(), &src_targets.view()).unwrap();

    let all = cada.query(&tgt_inputs.view(), 25).unwrap();
    for n in [0, 1, 7, 25].iter() {
        assert_eq!(cada.query(&tgt_inputs.view(), *n).unwrap()[..], all[..*n]);
    }

    let scores = cada.scores(&tgt_inputs.view()).unwrap();
    assert!(all.windows(2).all(|w| scores[w[0]] >= scores[w[1]]));
}

/// Target points on the noisy diagonal are preferred to those far from it.
#[test]
fn boundary_preferred() {
    let (src_inputs, src_targets) = domain(200, 6);
    let config = CadaConfig { density_weight: 0., ..Default::default() };
    let cada = Cada::with_config(&src_inputs.view(), &src_targets.view(), config).unwrap();

    let target = array![[0.2, 3.8], [2., 2.], [3.8, 0.2]];
    assert_eq!(cada.query(&target.view(), 1).unwrap(), vec![1]);
}

#[test]
fn invalid_queries() {
    let (src_inputs, src_targets) = domain(20, 7);
    let cada = Cada::new(&src_inputs.view(), &src_targets.view()).unwrap();

    let (tgt_inputs, _) = domain(5, 8);
    match cada.query(&tgt_inputs.view(), 6) {
        Err(Error::InvalidInput(_)) => {},
        _ => panic!("N > target size should be rejected"),
    }

    let wide = Array2::<f64>::zeros((5, 3));
    match cada.query(&wide.view(), 2) {
        Err(Error::InvalidInput(_)) => {},
        _ => panic!("Mismatched dimensionality should be rejected"),
    }
}
