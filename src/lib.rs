//! # lwe-estimate - Core-SVP security estimates for LWE parameters
//!
//! Estimates the bit-security of an LWE instance (n, q, σ) by finding the
//! smallest BKZ blocksize β at which a lattice attack succeeds, then pricing
//! that blocksize with the Core-SVP model: cost = 2^(0.292·β).
//!
//! Two attacks are modelled and the cheaper one is taken:
//!
//! 1. **Primal uSVP** - embed the instance and recover the short error vector
//! 2. **Dual distinguishing** - tell LWE samples from uniform with a short dual vector
//!
//! This is a comparative heuristic, not a proof. Production parameters should be
//! checked with the lattice-estimator (see [`security::cross_check`]).
//!
//! ## Modules
//!
//! - [`params`] - Validated parameter sets and estimator tunables
//! - [`security`] - Root Hermite factor model, attack searches, scoring
//! - [`report`] - Dimension sweeps, minimum-dimension search, tables
//! - [`error`] - Error type

pub mod error;
pub mod params;
pub mod report;
pub mod security;

pub use error::{EstimateError, Result};
pub use params::{EstimatorConfig, LweParameters, Noise};
pub use report::{format_table, is_monotone, min_dimension, sweep, SweepRow, DEFAULT_SWEEP};
pub use security::{
    dual_beta, estimate_security, primal_beta, root_hermite_factor, score, Attack, AttackResult,
    SecurityEstimate, SecurityLevel,
};
