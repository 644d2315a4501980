use thiserror::Error;

use crate::security::EstimatorCliError;

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("invalid dimension: n must be positive, got {0}")]
    InvalidDimension(u64),

    #[error("invalid modulus: q must be greater than 1, got {0}")]
    InvalidModulus(u64),

    #[error("invalid noise: sigma must be finite, got {0}")]
    InvalidNoise(f64),

    #[error("invalid estimator config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cross-check failed: {0}")]
    CrossCheck(#[from] EstimatorCliError),
}

pub type Result<T> = std::result::Result<T, EstimateError>;
