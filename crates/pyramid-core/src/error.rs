// File: crates/pyramid-core/src/error.rs
// Summary: Error type shared by aggregation, bucketing and dataset loading.

use thiserror::Error;

use crate::types::AgeBand;

#[derive(Error, Debug)]
pub enum PyramidError {
    /// Input series (or a series and its domain) disagree on shape.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A bucket rule references a band that is not part of the domain.
    #[error("unknown age band {band}")]
    UnknownBand { band: AgeBand },

    /// A per-band or overall population sum does not fit in `u64`.
    #[error("population overflow: {0}")]
    Overflow(String),

    #[error("invalid bucket rule: {0}")]
    InvalidBucket(String),

    #[error("invalid dataset: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PyramidError {
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }

    pub fn invalid_bucket(msg: impl Into<String>) -> Self {
        Self::InvalidBucket(msg.into())
    }

    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, PyramidError>;
