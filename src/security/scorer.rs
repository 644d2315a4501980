//! Combines the attack searches into a single Core-SVP security figure.

use serde::Serialize;
use tracing::debug;

use super::attacks::{Attack, AttackResult};
use crate::error::Result;
use crate::params::{EstimatorConfig, LweParameters};

/// Lower bound (inclusive) of the "strong" band, in bits.
pub const STRONG_BITS: f64 = 128.0;

/// Lower bound (inclusive) of the "moderate" band, in bits.
pub const MODERATE_BITS: f64 = 80.0;

/// Estimate for one parameter set. The attacker is assumed to pick the
/// cheaper attack, so `beta_min` is the smaller of the two blocksizes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SecurityEstimate {
    pub params: LweParameters,
    pub beta_primal: AttackResult,
    pub beta_dual: AttackResult,
    /// `None` when both attacks are infeasible.
    pub beta_min: Option<u32>,
    /// log2 of the attack cost; +∞ when both attacks are infeasible.
    pub security_bits: f64,
}

impl SecurityEstimate {
    pub fn level(&self) -> SecurityLevel {
        SecurityLevel::from_bits(self.security_bits)
    }

    /// Whether at least one attack succeeded inside the search range, so
    /// `security_bits` is a measured figure rather than a sentinel or +∞.
    pub fn is_measured(&self) -> bool {
        self.beta_primal.found() || self.beta_dual.found()
    }
}

impl std::fmt::Display for SecurityEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Parameters: {}", self.params)?;
        writeln!(f, "  Primal uSVP beta  : {}", self.beta_primal)?;
        writeln!(f, "  Dual attack beta  : {}", self.beta_dual)?;
        match self.beta_min {
            Some(beta) => writeln!(f, "  Min blocksize     : {beta}")?,
            None => writeln!(f, "  Min blocksize     : inf")?,
        }
        writeln!(f, "  Security level    : {:.1} bits", self.security_bits)?;
        write!(f, "  {} {}", self.level().tag(), self.level().summary())
    }
}

/// Three-way classification of an estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    /// ≥ 128 bits.
    Strong,
    /// [80, 128) bits.
    Moderate,
    /// < 80 bits.
    Weak,
}

impl SecurityLevel {
    pub fn from_bits(bits: f64) -> Self {
        if bits >= STRONG_BITS {
            SecurityLevel::Strong
        } else if bits >= MODERATE_BITS {
            SecurityLevel::Moderate
        } else {
            SecurityLevel::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Strong => "strong",
            SecurityLevel::Moderate => "moderate",
            SecurityLevel::Weak => "weak",
        }
    }

    /// Status marker used in report tables.
    pub fn tag(&self) -> &'static str {
        match self {
            SecurityLevel::Strong => "[PASS]",
            SecurityLevel::Moderate => "[WARN]",
            SecurityLevel::Weak => "[FAIL]",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            SecurityLevel::Strong => ">= 128-bit security",
            SecurityLevel::Moderate => "80-128 bit security",
            SecurityLevel::Weak => "< 80-bit security",
        }
    }
}

impl std::fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run both attack searches and convert the cheaper one to Core-SVP bits.
///
/// Fails with [`EstimateError::InvalidConfig`](crate::EstimateError::InvalidConfig)
/// when `config` does not validate.
pub fn score(params: &LweParameters, config: &EstimatorConfig) -> Result<SecurityEstimate> {
    config.validate()?;
    Ok(evaluate(params, config))
}

/// [`score`] with the default configuration.
pub fn estimate_security(params: &LweParameters) -> SecurityEstimate {
    evaluate(params, &EstimatorConfig::default())
}

/// Scoring for an already validated config.
pub(crate) fn evaluate(params: &LweParameters, config: &EstimatorConfig) -> SecurityEstimate {
    let beta_primal = Attack::PrimalUsvp.search(params, config);
    let beta_dual = Attack::Dual.search(params, config);

    let beta_min = match (beta_primal.beta(), beta_dual.beta()) {
        (Some(p), Some(d)) => Some(p.min(d)),
        (p, d) => p.or(d),
    };
    let security_bits = match beta_min {
        Some(beta) => config.core_svp_exponent * beta as f64,
        None => f64::INFINITY,
    };

    debug!(
        "{params}: primal={beta_primal}, dual={beta_dual}, bits={security_bits:.1}"
    );

    SecurityEstimate {
        params: *params,
        beta_primal,
        beta_dual,
        beta_min,
        security_bits,
    }
}
