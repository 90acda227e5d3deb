use anyhow::{anyhow, bail, Result};
use clap::Parser;
use coinpower_utils::binomial::validate_bias;
use coinpower_utils::power;
use env_logger::Env;
use itertools::Itertools;
use log::{debug, info, warn};
use std::path::Path;
use std::time::Instant;

mod cli;
mod io;

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

    // Nothing is written until every argument checks out
    let trial_counts = trial_counts(&args)?;
    let biases = unique_biases(&args.bias)?;
    power::validate_alpha(args.alpha)?;
    if let Some(target) = args.target_power {
        if target.is_nan() || target <= 0.0 || target > 1.0 {
            bail!("Target power must lie in (0, 1], got {}", target);
        }
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()?;

    // Create output directory
    let out_path = Path::new(&args.out);
    if out_path.exists() {
        bail!("Output directory already exists: {}", args.out);
    }
    std::fs::create_dir(out_path)
        .map_err(|e| anyhow!("Could not create output directory: {}", e))?;
    info!("Created output directory");

    power_curve(&args, &biases, &trial_counts)?;
    info!("Finished power curve");
    Ok(())
}

/// Trial counts requested on the command line
fn trial_counts(args: &cli::Cli) -> Result<Vec<u64>> {
    if args.step == 0 {
        bail!("Step between trial counts must be positive");
    }
    if args.min_trials == 0 || args.min_trials > args.max_trials {
        bail!(
            "Invalid trial range: {}..={}",
            args.min_trials,
            args.max_trials
        );
    }
    Ok((args.min_trials..=args.max_trials)
        .step_by(args.step as usize)
        .collect())
}

/// Validated biases with repeats removed, first occurrence kept
fn unique_biases(biases: &[f64]) -> Result<Vec<f64>> {
    if biases.is_empty() {
        bail!("At least one bias is required");
    }
    for &bias in biases {
        validate_bias(bias)?;
    }
    let unique: Vec<f64> = biases.iter().copied().unique_by(|b| b.to_bits()).collect();
    if unique.len() < biases.len() {
        warn!("Ignoring {} repeated biases", biases.len() - unique.len());
    }
    Ok(unique)
}

fn power_curve(args: &cli::Cli, biases: &[f64], trial_counts: &[u64]) -> Result<()> {
    let timer = Instant::now();
    info!(
        "Computing power for {} biases over {} trial counts (alpha={})",
        biases.len(),
        trial_counts.len(),
        args.alpha
    );
    let points = power::power_curve(biases, trial_counts, args.alpha)?;
    debug!("Computed {} points in {:?}", points.len(), timer.elapsed());

    let out = Path::new(&args.out);
    io::write_power_curve(&out.join("power_curve.tsv"), &points)?;

    let mut drops = Vec::with_capacity(biases.len());
    for bias in biases {
        let curve: Vec<_> = points
            .iter()
            .filter(|p| p.bias == *bias)
            .cloned()
            .collect();
        let bias_drops = power::power_drops(&curve);
        if !bias_drops.is_empty() {
            warn!(
                "Power for bias {} drops at {} trial counts, first after n={}",
                bias,
                bias_drops.len(),
                bias_drops[0]
            );
        }
        drops.push((*bias, bias_drops));
    }
    io::write_power_drops(&out.join("power_drops.tsv"), &drops)?;

    if let Some(target) = args.target_power {
        for bias in biases {
            match power::min_trials_for_power(*bias, target, args.alpha, args.max_trials)? {
                Some(n) => info!("Bias {}: power {} first reached at n={}", bias, target, n),
                None => info!(
                    "Bias {}: power {} not reached within {} trials",
                    bias, target, args.max_trials
                ),
            }
        }
    }

    info!("Wrote results to {} in {:?}", args.out, timer.elapsed());
    Ok(())
}
