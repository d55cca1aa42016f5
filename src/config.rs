use crate::binning::BinTable;
use crate::error::{BtResult, BtagError};
use crate::label::B_FLAVOR;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub binning: BinningParams,
    #[command(flatten)]
    pub sources: SourceParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BinningParams {
    /// Comma separated pT bin edges (GeV)
    #[arg(long, default_value = "20,30,50,70,100,150,200,300,500,1000")]
    pub pt_bins: String,
    /// Comma separated |eta| bin edges
    #[arg(long, default_value = "0.0,0.5,1.0,1.5,2.0,2.5")]
    pub abs_eta_bins: String,
}

impl Default for BinningParams {
    fn default() -> Self {
        Self {
            pt_bins: "20,30,50,70,100,150,200,300,500,1000".to_string(),
            abs_eta_bins: "0.0,0.5,1.0,1.5,2.0,2.5".to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceParams {
    /// Histogram file for true b-jets
    #[arg(long, default_value = "data/distrib_b.csv")]
    pub signal_file: String,
    /// Histogram file for every other flavor
    #[arg(long, default_value = "data/distrib_nonb.csv")]
    pub background_file: String,
    /// 0 leaves the random streams unseeded
    #[arg(long, default_value_t = 0)]
    pub random_seed: u64,
    #[arg(long, default_value_t = B_FLAVOR, allow_negative_numbers = true)]
    pub signal_flavor: i32,
}

impl Default for SourceParams {
    fn default() -> Self {
        Self {
            signal_file: "data/distrib_b.csv".to_string(),
            background_file: "data/distrib_nonb.csv".to_string(),
            random_seed: 0,
            signal_flavor: B_FLAVOR,
        }
    }
}

macro_rules! update_if_present {
    ($target:ident, $cli:ident, $matches:ident, $field:ident) => {
        if $matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
            $target.$field = $cli.$field.clone();
        }
    };
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BtResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BtagError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every value the user typed on the command line over `self`,
    /// leaving file-provided values for anything that fell back to a default.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        self.binning.merge_from_cli(&cli.binning, matches);
        self.sources.merge_from_cli(&cli.sources, matches);
    }
}

impl BinningParams {
    pub fn pt_table(&self) -> BtResult<BinTable> {
        BinTable::parse(&self.pt_bins, "pt")
    }

    pub fn abs_eta_table(&self) -> BtResult<BinTable> {
        let table = BinTable::parse(&self.abs_eta_bins, "abs_eta")?;
        if table.lower() < 0.0 {
            return Err(BtagError::Config(format!(
                "abs_eta bins must start at or above 0, got {}",
                table.lower()
            )));
        }
        Ok(table)
    }

    pub fn merge_from_cli(&mut self, cli: &BinningParams, matches: &ArgMatches) {
        update_if_present!(self, cli, matches, pt_bins);
        update_if_present!(self, cli, matches, abs_eta_bins);
    }
}

impl SourceParams {
    pub fn seed(&self) -> Option<u64> {
        if self.random_seed == 0 {
            None
        } else {
            Some(self.random_seed)
        }
    }

    pub fn merge_from_cli(&mut self, cli: &SourceParams, matches: &ArgMatches) {
        update_if_present!(self, cli, matches, signal_file);
        update_if_present!(self, cli, matches, background_file);
        update_if_present!(self, cli, matches, random_seed);
        update_if_present!(self, cli, matches, signal_flavor);
    }
}
