// In crates/notifier/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Refusing to record an invalid notification: {reason}")]
    InvalidNotification { reason: String },

    #[error("Failed to persist notification via {sink}: {reason}")]
    PersistenceFailure { sink: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
