use anyhow::Result;
use clap::Parser;
use coinpower_utils::simulation::{create_rng, simulate_power};
use env_logger::Env;
use log::{info, warn};

mod cli;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    // Set up logging level
    match args.verbosity {
        cli::LogLevel::silent => {
            env_logger::Builder::from_env(Env::default().default_filter_or("off")).init();
        }
        cli::LogLevel::normal => {
            env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
        }
        cli::LogLevel::verbose => {
            env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();
        }
    }

    info!(
        "Simulating {} experiments of {} flips with bias {} (seed {})",
        args.replicates, args.trials, args.bias, args.seed
    );
    let mut rng = create_rng(args.seed);
    let result = simulate_power(args.bias, args.trials, args.replicates, args.alpha, &mut rng)?;

    info!(
        "Simulated power {:.4} (se {:.4}), exact power {:.4}",
        result.estimated_power, result.standard_error, result.analytic_power
    );
    if !result.agrees(args.tolerance) {
        warn!(
            "Simulated and exact power differ by more than {}",
            args.tolerance
        );
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
