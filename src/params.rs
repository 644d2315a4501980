//! LWE parameter sets and estimator tunables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, Result};

/// First BKZ blocksize tried by the attack searches.
pub const BETA_START: u32 = 50;

/// Exclusive end of the blocksize scan. Reported as the blocksize when no
/// candidate succeeds.
pub const BETA_BOUND: u32 = 2000;

/// Core-SVP exponent: one SVP call in dimension β costs 2^(0.292·β).
pub const CORE_SVP_EXPONENT: f64 = 0.292;

/// Dual attack samples per secret coordinate (m = n).
pub const SAMPLE_RATIO: f64 = 1.0;

/// How the error distribution was specified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Noise {
    /// Discrete Gaussian given directly by σ.
    Gaussian,
    /// Centered binomial with parameter k (σ = sqrt(k/2)).
    CenteredBinomial { k: u64 },
}

/// An LWE instance: dimension n, modulus q and error standard deviation σ.
///
/// Construction rejects n = 0, q ≤ 1 and non-finite σ. A σ ≤ 0 is accepted
/// and makes both attacks infeasible.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LweParameters {
    n: u64,
    q: u64,
    sigma: f64,
    noise: Noise,
}

impl LweParameters {
    pub fn new(n: u64, q: u64, sigma: f64) -> Result<Self> {
        Self::with_noise(n, q, sigma, Noise::Gaussian)
    }

    fn with_noise(n: u64, q: u64, sigma: f64, noise: Noise) -> Result<Self> {
        if n == 0 {
            return Err(EstimateError::InvalidDimension(n));
        }
        if q <= 1 {
            return Err(EstimateError::InvalidModulus(q));
        }
        if !sigma.is_finite() {
            return Err(EstimateError::InvalidNoise(sigma));
        }
        Ok(Self { n, q, sigma, noise })
    }

    /// Centered binomial noise with parameter k, i.e. σ = sqrt(k/2).
    pub fn centered_binomial(n: u64, q: u64, k: u64) -> Result<Self> {
        Self::with_noise(n, q, (k as f64 / 2.0).sqrt(), Noise::CenteredBinomial { k })
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn noise(&self) -> Noise {
        self.noise
    }

    /// Relative noise rate α = σ/q.
    pub fn alpha(&self) -> f64 {
        self.sigma / self.q as f64
    }

    /// Same modulus and noise at a different dimension.
    pub fn with_n(&self, n: u64) -> Result<Self> {
        Self::with_noise(n, self.q, self.sigma, self.noise)
    }
}

impl std::fmt::Display for LweParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n={}, q={}, sigma={:.3}", self.n, self.q, self.sigma)
    }
}

/// Search bounds and cost constants used by the estimator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// First candidate blocksize (inclusive).
    pub beta_start: u32,
    /// End of the scan (exclusive); doubles as the exhaustion sentinel.
    pub beta_bound: u32,
    pub core_svp_exponent: f64,
    /// Dual attack sample count as a multiple of n.
    pub sample_ratio: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            beta_start: BETA_START,
            beta_bound: BETA_BOUND,
            core_svp_exponent: CORE_SVP_EXPONENT,
            sample_ratio: SAMPLE_RATIO,
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.beta_start < 2 {
            return Err(EstimateError::InvalidConfig(format!(
                "beta_start must be at least 2, got {}",
                self.beta_start
            )));
        }
        if self.beta_bound <= self.beta_start {
            return Err(EstimateError::InvalidConfig(format!(
                "beta_bound ({}) must exceed beta_start ({})",
                self.beta_bound, self.beta_start
            )));
        }
        if !(self.core_svp_exponent.is_finite() && self.core_svp_exponent > 0.0) {
            return Err(EstimateError::InvalidConfig(format!(
                "core_svp_exponent must be positive, got {}",
                self.core_svp_exponent
            )));
        }
        if !(self.sample_ratio.is_finite() && self.sample_ratio > 0.0) {
            return Err(EstimateError::InvalidConfig(format!(
                "sample_ratio must be positive, got {}",
                self.sample_ratio
            )));
        }
        Ok(())
    }

    /// Parse a JSON config; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Number of dual-attack samples m for dimension n.
    pub fn samples(&self, n: u64) -> u64 {
        ((n as f64 * self.sample_ratio).round() as u64).max(1)
    }

    /// Candidate blocksizes, in scan order.
    pub fn beta_range(&self) -> std::ops::Range<u32> {
        self.beta_start..self.beta_bound
    }
}
