use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use lwe_estimate::security::{cross_check, DEFAULT_CLI};
use lwe_estimate::{
    format_table, is_monotone, min_dimension, score, sweep, EstimatorConfig, LweParameters,
    DEFAULT_SWEEP,
};

#[derive(Parser, Debug)]
#[command(name = "estimate_lwe")]
#[command(about = "Estimate Core-SVP bit-security of LWE parameters")]
struct Args {
    #[arg(long, default_value = "768", help = "LWE dimension n")]
    n: u64,

    #[arg(long, default_value = "4096", help = "Modulus q")]
    q: u64,

    #[arg(long, help = "Error standard deviation (overrides --eta)")]
    sigma: Option<f64>,

    #[arg(long, default_value = "16", help = "Centered binomial parameter k, sigma = sqrt(k/2)")]
    eta: u64,

    #[arg(long, value_delimiter = ',', help = "Dimensions to sweep, comma separated")]
    sweep: Vec<u64>,

    #[arg(long, help = "Estimator config (JSON)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Find the smallest n reaching this many bits")]
    target_bits: Option<f64>,

    #[arg(long, default_value = "4096", help = "Upper limit for --target-bits search")]
    max_n: u64,

    #[arg(long, help = "Emit JSON instead of tables")]
    json: bool,

    #[arg(long, help = "Also run lattice-estimator-cli on the parameters")]
    cross_check: bool,

    #[arg(long, default_value = DEFAULT_CLI, help = "Path to lattice-estimator-cli")]
    estimator_path: PathBuf,

    #[arg(long, requires = "cross_check", help = "Exact (slower) lattice-estimator-cli run")]
    exact: bool,
}

fn main() -> lwe_estimate::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EstimatorConfig::from_json_file(path)?,
        None => EstimatorConfig::default(),
    };
    let params = match args.sigma {
        Some(sigma) => LweParameters::new(args.n, args.q, sigma)?,
        None => LweParameters::centered_binomial(args.n, args.q, args.eta)?,
    };
    let dims = if args.sweep.is_empty() {
        DEFAULT_SWEEP.to_vec()
    } else {
        args.sweep.clone()
    };

    let estimate = score(&params, &config)?;
    let rows = sweep(&params, &dims, &config)?;
    let min_n = match args.target_bits {
        Some(target) => min_dimension(params.q(), params.sigma(), target, args.max_n, &config)?,
        None => None,
    };
    let check = if args.cross_check {
        Some(cross_check(&args.estimator_path, &params, &config, args.exact)?)
    } else {
        None
    };

    if args.json {
        let out = json!({
            "config": config,
            "estimate": estimate,
            "level": estimate.level(),
            "sweep": rows,
            "min_dimension": min_n,
            "cross_check": check,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", "=".repeat(60));
    println!("LWE Security Estimator (Core-SVP)");
    println!("{}", "=".repeat(60));
    println!();
    println!("{estimate}");
    println!();

    println!("{}", "-".repeat(60));
    println!(
        "Parameter sweep (q={}, sigma={:.2}):",
        params.q(),
        params.sigma()
    );
    println!("{}", "-".repeat(60));
    print!("{}", format_table(&rows));
    if !is_monotone(&rows) {
        tracing::warn!("sweep blocksizes are not non-decreasing in n");
    }

    if let Some(target) = args.target_bits {
        println!();
        match min_n {
            Some(n) => println!("Smallest n for {target:.0} bits: {n}"),
            None => println!("No n <= {} reaches {target:.0} bits", args.max_n),
        }
    }

    if let Some(check) = &check {
        println!();
        println!(
            "lattice-estimator: {} bits (model deviation {:+.1})",
            check.reference_bits,
            check.deviation()
        );
    }

    println!();
    println!("Note: for production, verify with lattice-estimator:");
    println!("  https://github.com/malb/lattice-estimator");
    println!(
        "  sage: n, alpha, q = {}, {:.6}, {}",
        params.n(),
        params.alpha(),
        params.q()
    );
    println!("  sage: LWE.primal_usvp(LWEParameters(n, q, ...))");
    Ok(())
}
