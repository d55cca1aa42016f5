//! Example distribution files for trying the assigner without real tagger
//! output: Gaussian peaks near 1 for b-jets, falling exponentials for the rest.

use crate::error::{BtResult, BtagError};
use crate::grid::cell_name;
use crate::histfile::write_histogram_file;
use crate::histogram::Histogram1D;
use crate::label::ClassLabel;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp, Normal};
use serde::{Deserialize, Serialize};
use std::path::Path;

const SIGNAL_MEAN: f64 = 0.9;
const SIGNAL_SIGMA_STEP: f64 = 0.04;
const BACKGROUND_TAU_STEP: f64 = 0.08;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthParams {
    #[arg(long = "synth-bins", default_value_t = 100)]
    pub bins: usize,
    #[arg(long = "synth-entries", default_value_t = 100_000)]
    pub entries: usize,
    #[arg(long = "synth-seed", default_value_t = 1)]
    pub seed: u64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            bins: 100,
            entries: 100_000,
            seed: 1,
        }
    }
}

/// Gaussian width for signal cells; grows with |eta| bin.
pub fn signal_sigma(eta_bin: usize) -> f64 {
    SIGNAL_SIGMA_STEP * (1 + eta_bin) as f64
}

/// Exponential decay length for background cells; grows with pT bin.
pub fn background_tau(pt_bin: usize) -> f64 {
    BACKGROUND_TAU_STEP * (1 + pt_bin) as f64
}

fn fill_from<D: Distribution<f64>>(
    hist: &mut Histogram1D,
    dist: &D,
    entries: usize,
    rng: &mut StdRng,
) {
    for _ in 0..entries {
        hist.fill(dist.sample(rng));
    }
}

/// One filled histogram per `(eta_bin, pt_bin)` cell, named by the grid
/// naming contract.
pub fn generate_grid(
    class: ClassLabel,
    n_eta: usize,
    n_pt: usize,
    params: &SynthParams,
) -> BtResult<Vec<(String, Histogram1D)>> {
    if params.entries == 0 {
        return Err(BtagError::Config(
            "synth entries must be at least 1".to_string(),
        ));
    }

    let salt = class.index() as u64 * 0x9E37_79B9;
    let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(salt));
    let mut out = Vec::with_capacity(n_eta * n_pt);

    for eta_bin in 0..n_eta {
        for pt_bin in 0..n_pt {
            let mut hist = Histogram1D::new(params.bins, 0.0, 1.0)?;
            match class {
                ClassLabel::Signal => {
                    let sigma = signal_sigma(eta_bin);
                    let normal = Normal::new(SIGNAL_MEAN, sigma).map_err(|e| {
                        BtagError::Config(format!("Invalid signal width {}: {}", sigma, e))
                    })?;
                    fill_from(&mut hist, &normal, params.entries, &mut rng);
                }
                ClassLabel::Background => {
                    let tau = background_tau(pt_bin);
                    let exp = Exp::new(1.0 / tau).map_err(|e| {
                        BtagError::Config(format!(
                            "Invalid background decay length {}: {}",
                            tau, e
                        ))
                    })?;
                    fill_from(&mut hist, &exp, params.entries, &mut rng);
                }
            }
            if hist.integral() <= 0.0 {
                return Err(BtagError::Config(format!(
                    "{} cell ({}, {}) received no in-range entries",
                    class, eta_bin, pt_bin
                )));
            }
            out.push((cell_name(eta_bin, pt_bin), hist));
        }
    }
    Ok(out)
}

pub fn write_grid<P: AsRef<Path>>(
    path: P,
    class: ClassLabel,
    n_eta: usize,
    n_pt: usize,
    params: &SynthParams,
) -> BtResult<()> {
    let hists = generate_grid(class, n_eta, n_pt, params)?;
    write_histogram_file(path, &hists)
}
