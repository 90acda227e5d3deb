// src/bin/simulate_power/cli.rs
use clap::{Parser, ValueEnum};
#[derive(Parser, Debug)]
#[command(name = "simulate_power", version, about = "Monte Carlo check of the fair-coin test power")]
pub struct Cli {
    #[arg(long, short, default_value = "0.6", help = "True probability of heads")]
    pub bias: f64,

    #[arg(long, short = 'n', default_value = "100", help = "Number of flips per experiment")]
    pub trials: u64,

    #[arg(
        long,
        short,
        default_value = "10000",
        help = "Number of simulated experiments"
    )]
    pub replicates: u64,

    #[arg(long, default_value = "0.05", help = "Significance level")]
    pub alpha: f64,

    #[arg(long, short, default_value = "42", help = "Seed for the random number generator")]
    pub seed: u64,

    #[arg(
        long,
        default_value = "0.02",
        help = "Allowed difference between simulated and exact power"
    )]
    pub tolerance: f64,

    #[arg(
        value_enum,
        long,
        default_value = "normal",
        value_name = "VERBOSITY",
        help = "Verbosity level"
    )]
    pub verbosity: LogLevel,
}

#[derive(ValueEnum, Clone, Debug)]
#[allow(non_camel_case_types)]
pub enum LogLevel {
    verbose,
    normal,
    silent,
}
