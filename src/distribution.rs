use crate::binning::validate_edges;
use crate::error::{BtResult, BtagError};

/// A binned, non-negatively weighted density used purely as a sampling source.
///
/// The normalized cumulative table is built once at construction, so every
/// draw is a binary search over `B + 1` entries (O(log B)) followed by a
/// linear interpolation inside the chosen bin.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalDistribution {
    edges: Vec<f64>,
    weights: Vec<f64>,
    cumulative: Vec<f64>,
    total: f64,
    last_filled: usize,
}

impl EmpiricalDistribution {
    /// Equal-width bins covering `[lo, hi)`.
    pub fn from_range(lo: f64, hi: f64, weights: Vec<f64>) -> BtResult<Self> {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(BtagError::Config(format!(
                "Distribution range must be finite with lo < hi, got [{}, {})",
                lo, hi
            )));
        }
        if weights.is_empty() {
            return Err(BtagError::Config(
                "Distribution requires at least 1 bin".to_string(),
            ));
        }
        let n = weights.len();
        let width = (hi - lo) / n as f64;
        let mut edges: Vec<f64> = (0..n).map(|i| lo + width * i as f64).collect();
        edges.push(hi);
        Self::from_edges(edges, weights)
    }

    pub fn from_edges(edges: Vec<f64>, weights: Vec<f64>) -> BtResult<Self> {
        validate_edges(&edges, "Distribution")?;
        if weights.len() + 1 != edges.len() {
            return Err(BtagError::Config(format!(
                "Distribution weight count mismatch: expected {}, got {}",
                edges.len() - 1,
                weights.len()
            )));
        }
        for (i, w) in weights.iter().enumerate() {
            if !w.is_finite() || *w < 0.0 {
                return Err(BtagError::Config(format!(
                    "Distribution weight[{}] must be finite and >= 0, got {}",
                    i, w
                )));
            }
        }

        let total: f64 = weights.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(BtagError::Config(format!(
                "Distribution total weight must be > 0, got {}",
                total
            )));
        }

        let mut cumulative = Vec::with_capacity(weights.len() + 1);
        let mut running = 0.0;
        cumulative.push(0.0);
        for w in &weights {
            running += w;
            cumulative.push(running / total);
        }
        // Pin the top so u -> 1 never escapes the table through rounding.
        let n = weights.len();
        cumulative[n] = 1.0;

        let last_filled = weights
            .iter()
            .rposition(|w| *w > 0.0)
            .unwrap_or(n - 1);

        Ok(Self {
            edges,
            weights,
            cumulative,
            total,
            last_filled,
        })
    }

    /// Maps one uniform draw `u` in `[0, 1)` through the inverse CDF.
    ///
    /// The bin is chosen with probability proportional to its weight and the
    /// value is placed uniformly inside it, strictly below its upper edge.
    /// Out-of-range inputs are clamped and NaN is treated as 0, so this never
    /// fails; `u = 1` returns the upper edge of the last filled bin.
    #[inline]
    pub fn sample(&self, u: f64) -> f64 {
        let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };

        // first cumulative entry strictly above u; C[0] = 0 <= u so k >= 1
        let k = self.cumulative.partition_point(|c| *c <= u);
        let bin = (k - 1).min(self.last_filled);

        let c_lo = self.cumulative[bin];
        let c_hi = self.cumulative[bin + 1];
        let frac = if c_hi > c_lo {
            ((u - c_lo) / (c_hi - c_lo)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let lo = self.edges[bin];
        let hi = self.edges[bin + 1];
        let x = lo + (hi - lo) * frac;
        if x < hi {
            x
        } else if u >= 1.0 {
            hi
        } else {
            // rounding reached the upper edge; stay inside the half-open bin
            below(hi).max(lo)
        }
    }

    /// Draws one value using an explicit random stream.
    #[inline]
    pub fn draw(&self, rng: &mut fastrand::Rng) -> f64 {
        self.sample(rng.f64())
    }

    pub fn n_bins(&self) -> usize {
        self.weights.len()
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    pub fn probability(&self, bin: usize) -> f64 {
        self.weights.get(bin).map_or(0.0, |w| w / self.total)
    }

    pub fn mean(&self) -> f64 {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, w)| 0.5 * (self.edges[i] + self.edges[i + 1]) * w)
            .sum::<f64>()
            / self.total
    }
}

/// Largest finite `f64` strictly below `x`.
fn below(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x < 0.0 {
        f64::from_bits(x.to_bits() + 1)
    } else {
        -f64::from_bits(1)
    }
}
