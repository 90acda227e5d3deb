use thiserror::Error;

/// Errors raised by the power calculator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PowerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, PowerError>;

pub(crate) fn invalid<T>(msg: impl Into<String>) -> Result<T> {
    Err(PowerError::InvalidArgument(msg.into()))
}
