pub mod assigner;
pub mod binning;
pub mod config;
pub mod distribution;
pub mod error;
pub mod event;
pub mod grid;
pub mod histfile;
pub mod histogram;
pub mod label;
pub mod summary;
pub mod synth;
// cmd and reports are binary modules (see main.rs).

pub use assigner::{ScoreAssigner, SENTINEL_SCORE};
pub use binning::BinTable;
pub use distribution::EmpiricalDistribution;
pub use error::{BtResult, BtagError};
pub use grid::{ClassGrids, DistributionGrid};
pub use label::ClassLabel;
