#![allow(dead_code)]

use pseudobtag::grid::cell_name;
use pseudobtag::{BinTable, EmpiricalDistribution, ScoreAssigner};
use std::collections::HashMap;

pub type MemSource = HashMap<String, EmpiricalDistribution>;

/// 100 bins over [0, 1) with all weight in the bin holding `center`.
pub fn spike_at(center: f64) -> EmpiricalDistribution {
    let mut weights = vec![0.0; 100];
    let idx = ((center * 100.0) as usize).min(99);
    weights[idx] = 1.0;
    EmpiricalDistribution::from_range(0.0, 1.0, weights).unwrap()
}

pub fn flat(bins: usize) -> EmpiricalDistribution {
    EmpiricalDistribution::from_range(0.0, 1.0, vec![1.0; bins]).unwrap()
}

/// A source holding every cell of an `n_eta x n_pt` grid, built by `f`.
pub fn full_source<F>(n_eta: usize, n_pt: usize, f: F) -> MemSource
where
    F: Fn(usize, usize) -> EmpiricalDistribution,
{
    let mut source = HashMap::new();
    for i in 0..n_eta {
        for j in 0..n_pt {
            source.insert(cell_name(i, j), f(i, j));
        }
    }
    source
}

/// pT = {0, 50, 100}, |eta| = {0, 1, 2}. Signal cells spike at 0.9, background
/// cells at 0.1.
pub fn two_by_two_assigner() -> ScoreAssigner {
    let pt = BinTable::new(vec![0.0, 50.0, 100.0]).unwrap();
    let eta = BinTable::new(vec![0.0, 1.0, 2.0]).unwrap();
    let signal = full_source(2, 2, |_, _| spike_at(0.9));
    let background = full_source(2, 2, |_, _| spike_at(0.1));
    ScoreAssigner::from_sources(pt, eta, &signal, &background).unwrap()
}
