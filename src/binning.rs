use crate::error::{BtResult, BtagError};

/// Sorted bin edges for one kinematic axis.
///
/// `N` edges define `N - 1` half-open bins, bin `k` covering
/// `[edges[k], edges[k + 1])`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinTable {
    edges: Vec<f64>,
}

impl BinTable {
    pub fn new(edges: Vec<f64>) -> BtResult<Self> {
        validate_edges(&edges, "bin table")?;
        Ok(Self { edges })
    }

    /// Parses a comma separated edge list such as `"0,50,100"`.
    pub fn parse(list: &str, axis: &str) -> BtResult<Self> {
        let mut edges = Vec::new();
        for part in list.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let value: f64 = part.parse().map_err(|_| {
                BtagError::Config(format!("Invalid edge '{}' in {} bins", part, axis))
            })?;
            edges.push(value);
        }
        validate_edges(&edges, axis)?;
        Ok(Self { edges })
    }

    /// Returns the bin holding `x`, or `None` when `x` is outside
    /// `[edges[0], edges[last])` or NaN.
    #[inline]
    pub fn locate(&self, x: f64) -> Option<usize> {
        let first = self.edges[0];
        let last = self.edges[self.edges.len() - 1];
        if !(x >= first) || x >= last {
            return None;
        }
        // number of edges <= x, at least 1 here
        let k = self.edges.partition_point(|e| *e <= x);
        Some(k - 1)
    }

    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn bounds(&self, bin: usize) -> Option<(f64, f64)> {
        if bin < self.n_bins() {
            Some((self.edges[bin], self.edges[bin + 1]))
        } else {
            None
        }
    }

    pub fn lower(&self) -> f64 {
        self.edges[0]
    }

    pub fn upper(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }
}

pub(crate) fn validate_edges(edges: &[f64], what: &str) -> BtResult<()> {
    if edges.len() < 2 {
        return Err(BtagError::Config(format!(
            "{} requires at least 2 bin edges, got {}",
            what,
            edges.len()
        )));
    }
    for (i, e) in edges.iter().enumerate() {
        if !e.is_finite() {
            return Err(BtagError::Config(format!(
                "{} edge[{}] must be finite, got {}",
                what, i, e
            )));
        }
    }
    for (i, pair) in edges.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(BtagError::Config(format!(
                "{} edges must be strictly increasing, got edge[{}]={} and edge[{}]={}",
                what,
                i,
                pair[0],
                i + 1,
                pair[1]
            )));
        }
    }
    Ok(())
}
