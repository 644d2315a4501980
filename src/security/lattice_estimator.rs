//! Cross-check against the external `lattice-estimator-cli` tool.
//!
//! The in-crate model is a heuristic ranking; the lattice-estimator is the
//! reference for production parameters. [`cross_check`] shells out to its CLI
//! wrapper and pairs the result with the local estimate.

use std::path::Path;
use std::process::Command;

use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use super::scorer::{score, SecurityEstimate};
use crate::error::Result;
use crate::params::{EstimatorConfig, LweParameters, Noise};

/// Executable name looked up on PATH when no explicit path is given.
pub const DEFAULT_CLI: &str = "lattice-estimator-cli";

/// Secret/error distributions in the lattice-estimator-cli JSON format.
#[derive(Clone, Debug, PartialEq)]
pub enum Distribution {
    /// Discrete Gaussian with standard deviation σ.
    DiscreteGaussian { stddev: f64 },
    /// Centered binomial with parameter η.
    CenteredBinomial { eta: u64 },
    /// Uniform mod q.
    UniformMod,
}

impl Distribution {
    /// Error distribution an LWE parameter set was built from.
    pub fn noise_of(params: &LweParameters) -> Self {
        match params.noise() {
            Noise::Gaussian => Distribution::DiscreteGaussian {
                stddev: params.sigma(),
            },
            Noise::CenteredBinomial { k } => Distribution::CenteredBinomial { eta: k },
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Distribution::DiscreteGaussian { stddev } => {
                json!({ "distribution": "discrete_gaussian", "stddev": stddev })
            }
            Distribution::CenteredBinomial { eta } => {
                json!({ "distribution": "centered_binomial", "eta": eta })
            }
            Distribution::UniformMod => json!({ "distribution": "uniform_mod" }),
        }
    }

    pub fn to_json_string(&self) -> String {
        self.to_json_value().to_string()
    }
}

/// Errors from running the lattice-estimator-cli.
#[derive(Debug, Error)]
pub enum EstimatorCliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("lattice-estimator-cli exited with code {0:?}. stdout: {1} stderr: {2}")]
    NonZeroExit(Option<i32>, String, String),

    #[error("parse int error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

/// Run the estimator CLI at `cli_path` and return its bit-security figure.
///
/// The tool is invoked as `<cli> n q --s-dist <json> --e-dist <json> --m m [--exact]`
/// and the last non-empty line of stdout is parsed as an integer.
pub fn run_lattice_estimator_cli(
    cli_path: impl AsRef<Path>,
    params: &LweParameters,
    s_dist: &Distribution,
    e_dist: &Distribution,
    m: u64,
    exact: bool,
) -> std::result::Result<u64, EstimatorCliError> {
    let mut cmd = Command::new(cli_path.as_ref());
    cmd.arg(params.n().to_string()).arg(params.q().to_string());
    cmd.arg("--s-dist").arg(s_dist.to_json_string());
    cmd.arg("--e-dist").arg(e_dist.to_json_string());
    cmd.arg("--m").arg(m.to_string());
    if exact {
        cmd.arg("--exact");
    }

    let output = cmd.output()?;
    let stdout = String::from_utf8(output.stdout)?;
    if !output.status.success() {
        let stderr = String::from_utf8(output.stderr)?;
        return Err(EstimatorCliError::NonZeroExit(output.status.code(), stdout, stderr));
    }

    let last_line = stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .last()
        .unwrap_or("")
        .trim();
    Ok(last_line.parse()?)
}

/// Local estimate next to the external tool's answer.
#[derive(Clone, Debug, Serialize)]
pub struct CrossCheck {
    pub model: SecurityEstimate,
    pub reference_bits: u64,
}

impl CrossCheck {
    /// Model bits minus reference bits; positive means the model is more optimistic.
    pub fn deviation(&self) -> f64 {
        self.model.security_bits - self.reference_bits as f64
    }
}

/// Score `params` locally and with the external tool: uniform secret, the
/// error distribution `params` was built from, m from the config's sample ratio.
pub fn cross_check(
    cli_path: impl AsRef<Path>,
    params: &LweParameters,
    config: &EstimatorConfig,
    exact: bool,
) -> Result<CrossCheck> {
    let model = score(params, config)?;
    let reference_bits = run_lattice_estimator_cli(
        cli_path,
        params,
        &Distribution::UniformMod,
        &Distribution::noise_of(params),
        config.samples(params.n()),
        exact,
    )?;
    let check = CrossCheck {
        model,
        reference_bits,
    };
    info!(
        "cross-check {params}: model {:.1} bits, lattice-estimator {} bits",
        check.model.security_bits, check.reference_bits
    );
    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimateError;

    #[test]
    fn test_gaussian_noise_json() {
        let params = LweParameters::new(768, 4096, 3.0).unwrap();
        let json = Distribution::noise_of(&params).to_json_value();
        assert_eq!(json["distribution"], "discrete_gaussian");
        assert_eq!(json["stddev"], 3.0);
    }

    #[test]
    fn test_binomial_noise_json() {
        let params = LweParameters::centered_binomial(768, 4096, 16).unwrap();
        let dist = Distribution::noise_of(&params);
        assert_eq!(dist, Distribution::CenteredBinomial { eta: 16 });
        assert_eq!(
            dist.to_json_string(),
            r#"{"distribution":"centered_binomial","eta":16}"#
        );

        // A sweep keeps the binomial description at every dimension.
        let smaller = params.with_n(256).unwrap();
        assert_eq!(Distribution::noise_of(&smaller), Distribution::CenteredBinomial { eta: 16 });
    }

    #[test]
    fn test_uniform_secret_json() {
        assert_eq!(
            Distribution::UniformMod.to_json_string(),
            r#"{"distribution":"uniform_mod"}"#
        );
    }

    #[test]
    fn test_missing_cli_is_io_error() {
        let params = LweParameters::new(256, 4096, 3.0).unwrap();
        let err = cross_check(
            "/nonexistent/lattice-estimator-cli",
            &params,
            &EstimatorConfig::default(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, EstimateError::CrossCheck(EstimatorCliError::Io(_))));
    }

    #[test]
    fn test_invalid_config_fails_before_running_cli() {
        let params = LweParameters::new(256, 4096, 3.0).unwrap();
        let config = EstimatorConfig {
            beta_start: 1,
            ..Default::default()
        };
        let err = cross_check("/nonexistent/lattice-estimator-cli", &params, &config, false)
            .unwrap_err();
        assert!(matches!(err, EstimateError::InvalidConfig(_)));
    }

    #[test]
    fn test_deviation() {
        let params = LweParameters::new(64, 4096, 3.0).unwrap();
        let check = CrossCheck {
            model: score(&params, &EstimatorConfig::default()).unwrap(),
            reference_bits: 80,
        };
        assert!((check.deviation() - 10.52).abs() < 1e-9);
    }

    #[test]
    #[ignore]
    fn test_cross_check_current_configuration() {
        let params = LweParameters::centered_binomial(768, 4096, 16).unwrap();
        let check = cross_check(DEFAULT_CLI, &params, &EstimatorConfig::default(), false)
            .expect("CLI should run");
        assert!(check.reference_bits >= 128, "got {}", check.reference_bits);
    }
}
