//! Blocksize searches for the primal uSVP and dual distinguishing attacks.
//!
//! Both attacks scan β upwards over [`EstimatorConfig::beta_range`] and stop at
//! the first blocksize whose success condition holds. Exhausting the range is
//! not an error: the result carries the bound as a sentinel meaning "harder
//! than this model can measure".

use serde::Serialize;
use tracing::{debug, warn};

use super::rhf::root_hermite_factor;
use crate::error::Result;
use crate::params::{EstimatorConfig, LweParameters};

/// Lattice attack models covered by the estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attack {
    PrimalUsvp,
    Dual,
}

impl Attack {
    pub const ALL: [Attack; 2] = [Attack::PrimalUsvp, Attack::Dual];

    pub fn name(&self) -> &'static str {
        match self {
            Attack::PrimalUsvp => "primal uSVP",
            Attack::Dual => "dual",
        }
    }

    /// Validate `config`, then search for the smallest successful blocksize.
    pub fn solve(&self, params: &LweParameters, config: &EstimatorConfig) -> Result<AttackResult> {
        config.validate()?;
        Ok(self.search(params, config))
    }

    /// Search without re-validating; `config` must already have passed
    /// [`EstimatorConfig::validate`].
    pub(crate) fn search(&self, params: &LweParameters, config: &EstimatorConfig) -> AttackResult {
        match self {
            Attack::PrimalUsvp => primal_search(params, config),
            Attack::Dual => dual_search(params, config),
        }
    }
}

/// Outcome of one blocksize search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttackResult {
    /// Smallest β in range meeting the success condition.
    Found { beta: u32 },
    /// No β in range succeeded; `beta` is the scan bound.
    Exhausted { beta: u32 },
    /// σ ≤ 0: no finite blocksize applies.
    Infeasible,
}

impl AttackResult {
    /// Reported blocksize; `None` only for infeasible attacks.
    pub fn beta(&self) -> Option<u32> {
        match self {
            AttackResult::Found { beta } | AttackResult::Exhausted { beta } => Some(*beta),
            AttackResult::Infeasible => None,
        }
    }

    pub fn found(&self) -> bool {
        matches!(self, AttackResult::Found { .. })
    }

    /// Core-SVP cost log2 at the reported blocksize, +∞ when infeasible.
    pub fn cost_bits(&self, core_svp_exponent: f64) -> f64 {
        match self.beta() {
            Some(beta) => core_svp_exponent * beta as f64,
            None => f64::INFINITY,
        }
    }
}

impl std::fmt::Display for AttackResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttackResult::Found { beta } => write!(f, "{beta}"),
            AttackResult::Exhausted { beta } => write!(f, ">={beta}"),
            AttackResult::Infeasible => write!(f, "inf"),
        }
    }
}

fn search_beta<F>(
    attack: Attack,
    params: &LweParameters,
    config: &EstimatorConfig,
    succeeds: F,
) -> AttackResult
where
    F: Fn(u32, f64) -> bool,
{
    if params.sigma() <= 0.0 {
        warn!("{} attack infeasible for {params}: sigma <= 0", attack.name());
        return AttackResult::Infeasible;
    }

    for beta in config.beta_range() {
        if succeeds(beta, root_hermite_factor(beta)) {
            debug!("{} attack on {params} succeeds at beta={beta}", attack.name());
            return AttackResult::Found { beta };
        }
    }

    debug!(
        "{} attack on {params}: no beta in [{}, {}) succeeds",
        attack.name(),
        config.beta_start,
        config.beta_bound
    );
    AttackResult::Exhausted {
        beta: config.beta_bound,
    }
}

/// Primal uSVP: succeeds once δ^(β−1) · q^(n/β) ≤ σ·√n.
pub fn primal_beta(params: &LweParameters, config: &EstimatorConfig) -> Result<AttackResult> {
    Attack::PrimalUsvp.solve(params, config)
}

/// Dual distinguishing with m samples: succeeds once q^(1 − n/m) · δ^m · σ < 1.
///
/// At the default m = n the modulus factor is exactly 1.
pub fn dual_beta(params: &LweParameters, config: &EstimatorConfig) -> Result<AttackResult> {
    Attack::Dual.solve(params, config)
}

fn primal_search(params: &LweParameters, config: &EstimatorConfig) -> AttackResult {
    let n = params.n() as f64;
    let q = params.q() as f64;
    let target = params.sigma() * n.sqrt();

    search_beta(Attack::PrimalUsvp, params, config, |beta, delta| {
        let b = beta as f64;
        delta.powf(b - 1.0) * q.powf(n / b) <= target
    })
}

fn dual_search(params: &LweParameters, config: &EstimatorConfig) -> AttackResult {
    let n = params.n() as f64;
    let q = params.q() as f64;
    let m = config.samples(params.n()) as f64;
    let sigma = params.sigma();
    let modulus_factor = q.powf(1.0 - n / m);

    search_beta(Attack::Dual, params, config, |_, delta| {
        modulus_factor * delta.powf(m) * sigma < 1.0
    })
}
