// src/bin/power_curve/cli.rs
use clap::{Parser, ValueEnum};
#[derive(Parser, Debug)]
#[command(name = "power_curve", version, about = "Power of the fair-coin test over a range of trial counts")]
pub struct Cli {
    #[arg(
        long,
        short,
        value_delimiter = ',',
        default_values_t = vec![0.5, 0.55, 0.6, 0.75],
        value_name = "BIAS",
        help = "True probability of heads, comma separated"
    )]
    pub bias: Vec<f64>,

    #[arg(long, default_value = "10", help = "Smallest number of flips")]
    pub min_trials: u64,

    #[arg(long, default_value = "300", help = "Largest number of flips")]
    pub max_trials: u64,

    #[arg(long, default_value = "1", help = "Step between trial counts")]
    pub step: u64,

    #[arg(long, default_value = "0.05", help = "Significance level")]
    pub alpha: f64,

    #[arg(
        long,
        value_name = "POWER",
        help = "Report the smallest number of flips reaching this power for each bias"
    )]
    pub target_power: Option<f64>,

    #[arg(
        long,
        short,
        default_value = "power_curve",
        value_name = "OUT",
        help = "Output directory"
    )]
    pub out: String,

    #[arg(long, short, default_value = "1", help = "Number of threads to use")]
    pub threads: usize,

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
