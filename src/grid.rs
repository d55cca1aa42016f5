use crate::distribution::EmpiricalDistribution;
use crate::error::{BtResult, BtagError};
use crate::histfile::HistogramSource;
use crate::label::ClassLabel;
use strum::IntoEnumIterator;
use tracing::debug;

/// Name under which the distribution of cell `(eta_bin, pt_bin)` is stored.
pub fn cell_name(eta_bin: usize, pt_bin: usize) -> String {
    format!("hist_eta{}_pt{}", eta_bin, pt_bin)
}

/// Dense (|eta| bin x pT bin) table of distributions for one class label.
#[derive(Debug, Clone)]
pub struct DistributionGrid {
    n_eta: usize,
    n_pt: usize,
    // row-major by eta bin
    cells: Vec<EmpiricalDistribution>,
}

impl DistributionGrid {
    pub fn from_cells(
        n_eta: usize,
        n_pt: usize,
        cells: Vec<EmpiricalDistribution>,
    ) -> BtResult<Self> {
        if n_eta == 0 || n_pt == 0 {
            return Err(BtagError::Config(format!(
                "Distribution grid needs non-zero shape, got {}x{}",
                n_eta, n_pt
            )));
        }
        if cells.len() != n_eta * n_pt {
            return Err(BtagError::Config(format!(
                "Distribution grid expects {} cells ({}x{}), got {}",
                n_eta * n_pt,
                n_eta,
                n_pt,
                cells.len()
            )));
        }
        Ok(Self { n_eta, n_pt, cells })
    }

    /// Resolves every cell from `source`. Any absent cell fails the whole load.
    pub fn load<S: HistogramSource + ?Sized>(
        class: ClassLabel,
        n_eta: usize,
        n_pt: usize,
        source: &S,
    ) -> BtResult<Self> {
        let mut cells = Vec::with_capacity(n_eta * n_pt);
        for eta_bin in 0..n_eta {
            for pt_bin in 0..n_pt {
                let name = cell_name(eta_bin, pt_bin);
                match source.distribution(&name) {
                    Some(dist) => cells.push(dist?),
                    None => {
                        return Err(BtagError::MissingCell {
                            class,
                            eta_bin,
                            pt_bin,
                            name,
                            origin: source.origin().to_string(),
                        })
                    }
                }
            }
        }
        debug!(
            "   -> {} grid: {} cells from {}",
            class,
            cells.len(),
            source.origin()
        );
        Self::from_cells(n_eta, n_pt, cells)
    }

    /// Unchecked in the sense that indices must come from a successful bin
    /// lookup against tables of this shape.
    #[inline(always)]
    pub fn at(&self, eta_bin: usize, pt_bin: usize) -> &EmpiricalDistribution {
        debug_assert!(eta_bin < self.n_eta && pt_bin < self.n_pt);
        &self.cells[eta_bin * self.n_pt + pt_bin]
    }

    pub fn get(&self, eta_bin: usize, pt_bin: usize) -> Option<&EmpiricalDistribution> {
        if eta_bin < self.n_eta && pt_bin < self.n_pt {
            Some(&self.cells[eta_bin * self.n_pt + pt_bin])
        } else {
            None
        }
    }

    /// `(n_eta, n_pt)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_eta, self.n_pt)
    }
}

/// One grid per class label, addressed by the label itself.
#[derive(Debug, Clone)]
pub struct ClassGrids {
    grids: [DistributionGrid; ClassLabel::COUNT],
}

impl ClassGrids {
    pub fn new(signal: DistributionGrid, background: DistributionGrid) -> BtResult<Self> {
        if signal.shape() != background.shape() {
            return Err(BtagError::Config(format!(
                "Signal grid shape {:?} differs from background grid shape {:?}",
                signal.shape(),
                background.shape()
            )));
        }
        Ok(Self {
            grids: [signal, background],
        })
    }

    pub fn load<S1, S2>(
        n_eta: usize,
        n_pt: usize,
        signal_source: &S1,
        background_source: &S2,
    ) -> BtResult<Self>
    where
        S1: HistogramSource + ?Sized,
        S2: HistogramSource + ?Sized,
    {
        let signal = DistributionGrid::load(ClassLabel::Signal, n_eta, n_pt, signal_source)?;
        let background =
            DistributionGrid::load(ClassLabel::Background, n_eta, n_pt, background_source)?;
        Self::new(signal, background)
    }

    #[inline(always)]
    pub fn for_class(&self, label: ClassLabel) -> &DistributionGrid {
        &self.grids[label.index()]
    }

    pub fn shape(&self) -> (usize, usize) {
        self.grids[0].shape()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassLabel, &DistributionGrid)> {
        ClassLabel::iter().map(move |label| (label, self.for_class(label)))
    }
}
