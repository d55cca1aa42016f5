use crate::label::ClassLabel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BtagError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error(
        "Load Error: histogram '{name}' for {class} (eta bin {eta_bin}, pt bin {pt_bin}) not found in {origin}"
    )]
    MissingCell {
        class: ClassLabel,
        eta_bin: usize,
        pt_bin: usize,
        name: String,
        origin: String,
    },

    #[error("Load Error: {0}")]
    Load(String),
}

pub type BtResult<T> = Result<T, BtagError>;
