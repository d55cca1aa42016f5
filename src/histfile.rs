use crate::distribution::EmpiricalDistribution;
use crate::error::{BtResult, BtagError};
use crate::histogram::Histogram1D;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Anything that can resolve a named histogram into a sampling distribution.
///
/// `None` means the name is absent; `Some(Err(_))` means it exists but is
/// malformed (e.g. zero total weight).
pub trait HistogramSource {
    fn origin(&self) -> &str;
    fn distribution(&self, name: &str) -> Option<BtResult<EmpiricalDistribution>>;
}

impl HistogramSource for HashMap<String, EmpiricalDistribution> {
    fn origin(&self) -> &str {
        "in-memory histograms"
    }

    fn distribution(&self, name: &str) -> Option<BtResult<EmpiricalDistribution>> {
        self.get(name).cloned().map(Ok)
    }
}

#[derive(Debug, Deserialize)]
struct BinRow {
    name: String,
    low: f64,
    high: f64,
    content: f64,
}

#[derive(Debug, Serialize)]
struct BinRowOut<'a> {
    name: &'a str,
    low: f64,
    high: f64,
    content: f64,
}

/// Histograms read from a `name,low,high,content` CSV file.
///
/// The file is read eagerly and closed before the store is returned; nothing
/// downstream holds a handle to it.
#[derive(Debug, Clone, Default)]
pub struct HistogramStore {
    origin: String,
    bins: HashMap<String, Vec<(f64, f64, f64)>>,
}

impl HistogramStore {
    pub fn load<P: AsRef<Path>>(path: P) -> BtResult<Self> {
        let path = path.as_ref();
        info!("📂 Loading histograms from: {}", path.display());
        let file = File::open(path).map_err(|e| {
            BtagError::Load(format!(
                "Could not open histogram file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_reader(file, path.display().to_string())
    }

    pub fn from_reader<R: Read>(reader: R, origin: impl Into<String>) -> BtResult<Self> {
        let origin = origin.into();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut bins: HashMap<String, Vec<(f64, f64, f64)>> = HashMap::new();
        let mut rows = 0usize;
        for result in rdr.deserialize() {
            let row: BinRow = result?;
            bins.entry(row.name)
                .or_default()
                .push((row.low, row.high, row.content));
            rows += 1;
        }

        debug!(
            "   -> {} rows, {} histograms from {}",
            rows,
            bins.len(),
            origin
        );

        Ok(Self { origin, bins })
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn build(&self, name: &str, rows: &[(f64, f64, f64)]) -> BtResult<EmpiricalDistribution> {
        let mut rows = rows.to_vec();
        rows.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut edges = Vec::with_capacity(rows.len() + 1);
        let mut weights = Vec::with_capacity(rows.len());
        for (k, &(low, high, content)) in rows.iter().enumerate() {
            if k > 0 {
                let prev_high = rows[k - 1].1;
                let tol = 1e-9 * prev_high.abs().max(1.0);
                if (prev_high - low).abs() > tol {
                    return Err(BtagError::Load(format!(
                        "Histogram '{}' in {} has a gap or overlap at {} -> {}",
                        name, self.origin, prev_high, low
                    )));
                }
            }
            edges.push(low);
            weights.push(content);
            if k + 1 == rows.len() {
                edges.push(high);
            }
        }

        EmpiricalDistribution::from_edges(edges, weights).map_err(|e| match e {
            BtagError::Config(msg) => BtagError::Config(format!(
                "Histogram '{}' in {}: {}",
                name, self.origin, msg
            )),
            other => other,
        })
    }
}

impl HistogramSource for HistogramStore {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn distribution(&self, name: &str) -> Option<BtResult<EmpiricalDistribution>> {
        self.bins.get(name).map(|rows| self.build(name, rows))
    }
}

pub fn write_histograms<W: Write>(writer: W, hists: &[(String, Histogram1D)]) -> BtResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (name, hist) in hists {
        for (bin, &content) in hist.contents().iter().enumerate() {
            let (low, high) = hist.bin_bounds(bin);
            wtr.serialize(BinRowOut {
                name,
                low,
                high,
                content,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_histogram_file<P: AsRef<Path>>(
    path: P,
    hists: &[(String, Histogram1D)],
) -> BtResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_histograms(file, hists)?;
    info!("💾 Wrote {} histograms to {}", hists.len(), path.display());
    Ok(())
}
