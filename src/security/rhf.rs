use std::f64::consts::{E, PI};

/// Root Hermite factor δ reached by BKZ with blocksize β under the
/// geometric series assumption:
///
/// δ(β) = (β / (2πe) · (πβ)^(1/β))^(1 / (2(β − 1)))
///
/// Only defined for β ≥ 2.
pub fn root_hermite_factor(beta: u32) -> f64 {
    debug_assert!(beta >= 2, "root Hermite factor undefined for beta={beta}");
    let b = beta as f64;
    let inner = b / (2.0 * PI * E) * (PI * b).powf(1.0 / b);
    inner.powf(1.0 / (2.0 * (b - 1.0)))
}
