pub mod binomial;
pub mod error;
pub mod power;
pub mod pvalue;
pub mod simulation;
