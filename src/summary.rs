use crate::binning::BinTable;
use crate::error::{BtResult, BtagError};
use crate::event::JetRecord;
use crate::histogram::Histogram1D;
use crate::label::ClassLabel;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinSummary {
    pub eta_bin: usize,
    pub pt_bin: usize,
    pub jets: usize,
    pub signal_jets: usize,
    pub score_sum: f64,
}

impl BinSummary {
    pub fn mean_score(&self) -> Option<f64> {
        if self.jets > 0 {
            Some(self.score_sum / self.jets as f64)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreSummary {
    pub total_jets: usize,
    pub sentinel_jets: usize,
    pub unscored_jets: usize,
    /// Row-major by eta bin, matching the distribution grid layout.
    pub cells: Vec<BinSummary>,
}

/// Per-cell counts and mean scores of already scored jets.
pub fn summarize(
    pt_bins: &BinTable,
    abs_eta_bins: &BinTable,
    jets: &[JetRecord],
    signal_flavor: i32,
) -> ScoreSummary {
    let n_eta = abs_eta_bins.n_bins();
    let n_pt = pt_bins.n_bins();

    let mut summary = ScoreSummary {
        cells: (0..n_eta * n_pt)
            .map(|i| BinSummary {
                eta_bin: i / n_pt,
                pt_bin: i % n_pt,
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };

    for jet in jets {
        summary.total_jets += 1;
        let Some(score) = jet.btag_score else {
            summary.unscored_jets += 1;
            continue;
        };
        let bins = abs_eta_bins
            .locate(jet.eta.abs())
            .zip(pt_bins.locate(jet.pt));
        match bins {
            Some((eta_bin, pt_bin)) => {
                let cell = &mut summary.cells[eta_bin * n_pt + pt_bin];
                cell.jets += 1;
                cell.score_sum += score;
                if ClassLabel::from_flavor(jet.flavor, signal_flavor) == ClassLabel::Signal {
                    cell.signal_jets += 1;
                }
            }
            // the assigner gives exactly these jets the sentinel
            None => summary.sentinel_jets += 1,
        }
    }
    summary
}

/// Parses a `"lo,hi"` window.
pub fn parse_window(s: &str, what: &str) -> BtResult<(f64, f64)> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(BtagError::Config(format!(
            "--{} requires exactly 2 values 'lo,hi', got '{}'",
            what, s
        )));
    }
    let parse = |p: &str| {
        p.parse::<f64>()
            .map_err(|_| BtagError::Config(format!("Invalid number '{}' in --{}", p, what)))
    };
    let lo = parse(parts[0])?;
    let hi = parse(parts[1])?;
    if !(lo < hi) {
        return Err(BtagError::Config(format!(
            "--{} needs lo < hi, got [{}, {})",
            what, lo, hi
        )));
    }
    Ok((lo, hi))
}

/// Histogram over `[0, 1)` of the scores of jets with `pt` in `pt_window`
/// and `|eta|` in `abs_eta_window` (both half-open).
pub fn window_histogram(
    jets: &[JetRecord],
    pt_window: (f64, f64),
    abs_eta_window: (f64, f64),
    bins: usize,
) -> BtResult<Histogram1D> {
    let mut hist = Histogram1D::new(bins, 0.0, 1.0)?;
    for jet in jets {
        let aeta = jet.eta.abs();
        let in_window = jet.pt >= pt_window.0
            && jet.pt < pt_window.1
            && aeta >= abs_eta_window.0
            && aeta < abs_eta_window.1;
        if in_window {
            if let Some(score) = jet.btag_score {
                hist.fill(score);
            }
        }
    }
    Ok(hist)
}
