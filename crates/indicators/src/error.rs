// In crates/indicators/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Moving average period must be at least 1")]
    InvalidPeriod,

    #[error("Insufficient data: need {required} values, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid strategy settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
