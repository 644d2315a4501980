mod attacks;
mod lattice_estimator;
mod rhf;
mod scorer;

pub use attacks::{dual_beta, primal_beta, Attack, AttackResult};
pub use lattice_estimator::{
    cross_check, run_lattice_estimator_cli, CrossCheck, Distribution, EstimatorCliError,
    DEFAULT_CLI,
};
pub use rhf::root_hermite_factor;
pub(crate) use scorer::evaluate;
pub use scorer::{
    estimate_security, score, SecurityEstimate, SecurityLevel, MODERATE_BITS, STRONG_BITS,
};
