// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown signal '{0}', expected 'buy' or 'sell'")]
    UnknownSignal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
