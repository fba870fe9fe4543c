//! error types for chain client

use private_transfer::SubmissionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("not connected to chain")]
    NotConnected,

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("xcm error: {0}")]
    XcmError(String),

    #[error("timeout waiting for {0}")]
    Timeout(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

pub type Result<T> = std::result::Result<T, ChainError>;

impl From<ChainError> for SubmissionError {
    fn from(e: ChainError) -> Self {
        match e {
            ChainError::EncodingError(msg) | ChainError::XcmError(msg) => {
                SubmissionError::Encoding(msg)
            }
            ChainError::Timeout(what) => SubmissionError::Timeout(what),
            other => SubmissionError::Transport(other.to_string()),
        }
    }
}
