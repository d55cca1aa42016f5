use crate::binning::BinTable;
use crate::config::Config;
use crate::error::{BtResult, BtagError};
use crate::event::JetRecord;
use crate::grid::ClassGrids;
use crate::histfile::{HistogramSource, HistogramStore};
use crate::label::ClassLabel;
use tracing::info;

/// Score reported for jets whose kinematics fall outside every bin.
pub const SENTINEL_SCORE: f64 = -1.0;

/// Per-jet orchestration: bin lookup, class grid selection, sampling.
///
/// Everything fallible happens in the constructors. Once built, `assign` is
/// total and allocation free, and the assigner can be shared across threads.
#[derive(Debug, Clone)]
pub struct ScoreAssigner {
    pt_bins: BinTable,
    abs_eta_bins: BinTable,
    grids: ClassGrids,
}

impl ScoreAssigner {
    pub fn new(pt_bins: BinTable, abs_eta_bins: BinTable, grids: ClassGrids) -> BtResult<Self> {
        let expected = (abs_eta_bins.n_bins(), pt_bins.n_bins());
        if grids.shape() != expected {
            return Err(BtagError::Config(format!(
                "Grid shape {:?} does not match bin tables (abs_eta x pt) {:?}",
                grids.shape(),
                expected
            )));
        }
        Ok(Self {
            pt_bins,
            abs_eta_bins,
            grids,
        })
    }

    pub fn from_sources<S1, S2>(
        pt_bins: BinTable,
        abs_eta_bins: BinTable,
        signal_source: &S1,
        background_source: &S2,
    ) -> BtResult<Self>
    where
        S1: HistogramSource + ?Sized,
        S2: HistogramSource + ?Sized,
    {
        let grids = ClassGrids::load(
            abs_eta_bins.n_bins(),
            pt_bins.n_bins(),
            signal_source,
            background_source,
        )?;
        Self::new(pt_bins, abs_eta_bins, grids)
    }

    /// Loads both histogram files named by `config`. The stores (and with
    /// them every file handle) are dropped before this returns.
    pub fn from_config(config: &Config) -> BtResult<Self> {
        let pt_bins = config.binning.pt_table()?;
        let abs_eta_bins = config.binning.abs_eta_table()?;

        let assigner = {
            let signal = HistogramStore::load(&config.sources.signal_file)?;
            let background = HistogramStore::load(&config.sources.background_file)?;
            Self::from_sources(pt_bins, abs_eta_bins, &signal, &background)?
        };

        let (n_eta, n_pt) = assigner.grids.shape();
        info!(
            "✅ Score assigner ready: {} |eta| bins x {} pT bins per class",
            n_eta, n_pt
        );
        Ok(assigner)
    }

    /// `(eta_bin, pt_bin)` for a jet, or `None` when either axis is unbinned.
    #[inline]
    pub fn locate(&self, pt: f64, eta: f64) -> Option<(usize, usize)> {
        let eta_bin = self.abs_eta_bins.locate(eta.abs())?;
        let pt_bin = self.pt_bins.locate(pt)?;
        Some((eta_bin, pt_bin))
    }

    /// Scores one jet from an explicit uniform draw.
    #[inline]
    pub fn assign_uniform(&self, pt: f64, eta: f64, label: ClassLabel, u: f64) -> f64 {
        match self.locate(pt, eta) {
            Some((eta_bin, pt_bin)) => self
                .grids
                .for_class(label)
                .at(eta_bin, pt_bin)
                .sample(u),
            None => SENTINEL_SCORE,
        }
    }

    /// Scores one jet. Out-of-range jets return the sentinel without touching
    /// `rng`.
    #[inline]
    pub fn assign(&self, pt: f64, eta: f64, label: ClassLabel, rng: &mut fastrand::Rng) -> f64 {
        match self.locate(pt, eta) {
            Some((eta_bin, pt_bin)) => self
                .grids
                .for_class(label)
                .at(eta_bin, pt_bin)
                .draw(rng),
            None => SENTINEL_SCORE,
        }
    }

    /// Fills `btag_score` on every jet of one event.
    pub fn assign_jets(&self, jets: &mut [JetRecord], signal_flavor: i32, rng: &mut fastrand::Rng) {
        for jet in jets.iter_mut() {
            let label = ClassLabel::from_flavor(jet.flavor, signal_flavor);
            jet.btag_score = Some(self.assign(jet.pt, jet.eta, label, rng));
        }
    }

    pub fn pt_bins(&self) -> &BinTable {
        &self.pt_bins
    }

    pub fn abs_eta_bins(&self) -> &BinTable {
        &self.abs_eta_bins
    }

    pub fn grids(&self) -> &ClassGrids {
        &self.grids
    }
}
