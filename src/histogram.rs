use crate::distribution::EmpiricalDistribution;
use crate::error::{BtResult, BtagError};

/// Fixed-width fillable histogram with under/overflow counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram1D {
    lo: f64,
    hi: f64,
    contents: Vec<f64>,
    underflow: f64,
    overflow: f64,
    entries: u64,
}

impl Histogram1D {
    pub fn new(bins: usize, lo: f64, hi: f64) -> BtResult<Self> {
        if bins == 0 {
            return Err(BtagError::Config(
                "Histogram requires at least 1 bin".to_string(),
            ));
        }
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(BtagError::Config(format!(
                "Histogram range must be finite with lo < hi, got [{}, {})",
                lo, hi
            )));
        }
        Ok(Self {
            lo,
            hi,
            contents: vec![0.0; bins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
        })
    }

    pub fn fill(&mut self, x: f64) {
        self.fill_weighted(x, 1.0);
    }

    pub fn fill_weighted(&mut self, x: f64, weight: f64) {
        self.entries += 1;
        if x.is_nan() || x < self.lo {
            self.underflow += weight;
            return;
        }
        if x >= self.hi {
            self.overflow += weight;
            return;
        }
        let n = self.contents.len();
        let idx = (((x - self.lo) / (self.hi - self.lo)) * n as f64) as usize;
        self.contents[idx.min(n - 1)] += weight;
    }

    pub fn n_bins(&self) -> usize {
        self.contents.len()
    }

    pub fn range(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn bin_width(&self) -> f64 {
        (self.hi - self.lo) / self.contents.len() as f64
    }

    pub fn bin_bounds(&self, bin: usize) -> (f64, f64) {
        let w = self.bin_width();
        let lo = self.lo + w * bin as f64;
        let hi = if bin + 1 == self.contents.len() {
            self.hi
        } else {
            self.lo + w * (bin + 1) as f64
        };
        (lo, hi)
    }

    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    pub fn underflow(&self) -> f64 {
        self.underflow
    }

    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// In-range weight, excluding under/overflow.
    pub fn integral(&self) -> f64 {
        self.contents.iter().sum()
    }

    /// Freezes the in-range contents into a sampling distribution.
    pub fn to_distribution(&self) -> BtResult<EmpiricalDistribution> {
        EmpiricalDistribution::from_range(self.lo, self.hi, self.contents.clone())
    }
}
