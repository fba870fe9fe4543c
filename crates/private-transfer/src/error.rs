//! error types for the transfer pipeline

use thiserror::Error;

/// identifier, amount and address encoding failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("value needs {bytes} bytes, asset id holds 32")]
    Overflow { bytes: usize },

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("amount does not fit in 128 bits: {0}")]
    AmountOverflow(String),

    #[error("invalid shielded address: {0}")]
    InvalidAddress(String),
}

/// proving module rejected the request or failed internally
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvingError {
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// a post that does not match the runtime schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error(
        "no ledger call for a post with {sources} sources, {senders} senders, \
         {receivers} receivers and {sinks} sinks"
    )]
    UnknownShape {
        sources: usize,
        senders: usize,
        receivers: usize,
        sinks: usize,
    },

    #[error("post layout mismatch: {0}")]
    Layout(String),

    #[error("soul-bound private transfer requires an address digest")]
    MissingAddressDigest,
}

/// chain client failed to build, accept or include a call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("call encoding failed: {0}")]
    Encoding(String),

    #[error("extrinsic rejected: {0}")]
    Rejected(String),

    #[error("timeout waiting for {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("proving error: {0}")]
    Proving(#[from] ProvingError),

    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("asset metadata error: {0}")]
    Metadata(String),

    #[error("relay error: {0}")]
    Relay(String),
}

pub type Result<T> = std::result::Result<T, TransferError>;
