//! Dimension sweeps and report tables.

use serde::Serialize;

use crate::error::Result;
use crate::params::{EstimatorConfig, LweParameters};
use crate::security::{evaluate, SecurityEstimate, SecurityLevel};

/// Dimensions swept by the CLI when none are given.
pub const DEFAULT_SWEEP: [u64; 7] = [256, 384, 512, 640, 768, 896, 1024];

/// One line of a sweep table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepRow {
    pub n: u64,
    pub beta: Option<u32>,
    pub bits: f64,
    pub level: SecurityLevel,
}

impl From<&SecurityEstimate> for SweepRow {
    fn from(est: &SecurityEstimate) -> Self {
        Self {
            n: est.params.n(),
            beta: est.beta_min,
            bits: est.security_bits,
            level: est.level(),
        }
    }
}

/// Score `base` at every dimension in `dims`, keeping q and σ fixed.
pub fn sweep(
    base: &LweParameters,
    dims: &[u64],
    config: &EstimatorConfig,
) -> Result<Vec<SweepRow>> {
    config.validate()?;
    dims.iter()
        .map(|&n| {
            let params = base.with_n(n)?;
            Ok(SweepRow::from(&evaluate(&params, config)))
        })
        .collect()
}

/// True when blocksizes never decrease along the sweep (infeasible counts as largest).
pub fn is_monotone(rows: &[SweepRow]) -> bool {
    rows.windows(2)
        .all(|w| w[0].beta.unwrap_or(u32::MAX) <= w[1].beta.unwrap_or(u32::MAX))
}

/// Smallest n in [1, max_n] reaching `target_bits` at the given q and σ.
///
/// Dimensions below the first n at which the primal search succeeds are
/// skipped: there σ·√n is shorter than anything BKZ reaches in range, both
/// searches run off the end, and the sentinel 0.292·bound says nothing about
/// hardness. From that n on neither blocksize decreases as n grows, so the
/// remainder is a binary search.
///
/// Returns `None` when no primal estimate exists up to `max_n` (including
/// σ ≤ 0) or when `max_n` itself falls short of the target.
pub fn min_dimension(
    q: u64,
    sigma: f64,
    target_bits: f64,
    max_n: u64,
    config: &EstimatorConfig,
) -> Result<Option<u64>> {
    config.validate()?;
    let estimate_at = |n: u64| -> Result<SecurityEstimate> {
        Ok(evaluate(&LweParameters::new(n, q, sigma)?, config))
    };

    let mut first = None;
    for n in 1..=max_n {
        let est = estimate_at(n)?;
        if est.beta_primal.found() {
            if est.security_bits >= target_bits {
                return Ok(Some(n));
            }
            first = Some(n);
            break;
        }
    }
    let Some(first) = first else {
        return Ok(None);
    };

    if estimate_at(max_n)?.security_bits < target_bits {
        return Ok(None);
    }

    let (mut lo, mut hi) = (first + 1, max_n);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if estimate_at(mid)?.security_bits >= target_bits {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Ok(Some(lo))
}

/// Render rows as `n | beta | bits | status`.
pub fn format_table(rows: &[SweepRow]) -> String {
    let rule = "-".repeat(44);
    let mut out = format!("{:>6} | {:>6} | {:>8} | {:>10}\n{rule}\n", "n", "beta", "bits", "status");
    for row in rows {
        let beta = row.beta.map_or_else(|| "inf".to_string(), |b| b.to_string());
        out.push_str(&format!(
            "{:>6} | {:>6} | {:>8.1} | {:>10}\n",
            row.n,
            beta,
            row.bits,
            row.level.tag()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::estimate_security;

    fn base() -> LweParameters {
        LweParameters::centered_binomial(768, 4096, 16).unwrap()
    }

    #[test]
    fn test_default_sweep_is_monotone() {
        let rows = sweep(&base(), &DEFAULT_SWEEP, &EstimatorConfig::default()).unwrap();
        assert_eq!(rows.len(), DEFAULT_SWEEP.len());
        assert!(is_monotone(&rows));

        let betas: Vec<_> = rows.iter().map(|r| r.beta).collect();
        assert_eq!(betas[0], Some(1295));
        assert_eq!(betas[1], Some(1940));
        assert!(betas[2..].iter().all(|b| *b == Some(2000)));
    }

    #[test]
    fn test_sweep_rejects_zero_dimension() {
        assert!(sweep(&base(), &[256, 0], &EstimatorConfig::default()).is_err());
    }

    #[test]
    fn test_is_monotone_detects_drop() {
        let row = |n, beta| SweepRow {
            n,
            beta,
            bits: 0.0,
            level: SecurityLevel::Weak,
        };
        assert!(is_monotone(&[row(1, Some(50)), row(2, Some(50)), row(3, None)]));
        assert!(!is_monotone(&[row(1, Some(60)), row(2, Some(50))]));
        assert!(!is_monotone(&[row(1, None), row(2, Some(2000))]));
    }

    #[test]
    fn test_min_dimension_matches_linear_scan() {
        let config = EstimatorConfig::default();
        let found = min_dimension(4096, 3.0, 80.0, 1024, &config).unwrap().unwrap();
        let bits = |n| {
            let params = LweParameters::new(n, 4096, 3.0).unwrap();
            estimate_security(&params).security_bits
        };
        assert_eq!(found, 57);
        assert!(bits(found) >= 80.0);
        assert!(bits(found - 1) < 80.0);
    }

    #[test]
    fn test_min_dimension_skips_sentinel_dimensions() {
        let config = EstimatorConfig::default();
        // For n <= 25 both searches exhaust and report 584 bits; the primal
        // attack first succeeds at n = 26 (beta 359, 104.8 bits).
        let small = estimate_security(&LweParameters::new(1, 1024, 1.5).unwrap());
        assert_eq!(small.security_bits, 0.292 * 2000.0);
        assert!(!small.is_measured());
        assert_eq!(min_dimension(1024, 1.5, 100.0, 400, &config).unwrap(), Some(26));
    }

    #[test]
    fn test_min_dimension_without_primal_estimate() {
        let config = EstimatorConfig::default();
        assert_eq!(min_dimension(4096, 0.0, 80.0, 256, &config).unwrap(), None);
        assert_eq!(min_dimension(4096, 2.0, 80.0, 1, &config).unwrap(), None);
    }

    #[test]
    fn test_min_dimension_rejects_invalid_config() {
        let config = EstimatorConfig {
            beta_start: 0,
            ..Default::default()
        };
        assert!(min_dimension(4096, 3.0, 80.0, 1024, &config).is_err());
        assert!(sweep(&base(), &DEFAULT_SWEEP, &config).is_err());
    }

    #[test]
    fn test_min_dimension_unreachable_target() {
        let config = EstimatorConfig::default();
        // The sentinel caps the estimate at 0.292 * 2000 = 584 bits.
        assert_eq!(min_dimension(4096, 3.0, 600.0, 2048, &config).unwrap(), None);
        assert_eq!(min_dimension(4096, 3.0, 80.0, 0, &config).unwrap(), None);
    }

    #[test]
    fn test_format_table() {
        let rows = sweep(&base(), &[256, 1024], &EstimatorConfig::default()).unwrap();
        let table = format_table(&rows);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("beta") && lines[0].contains("status"));
        assert!(lines[2].contains("1295") && lines[2].contains("378.1") && lines[2].contains("[PASS]"));
        assert!(lines[3].contains("2000") && lines[3].contains("584.0"));
    }
}
