//! Error types shared by the pipeline core.

use crate::ids::Order;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("malformed task {step_id}: {message}")]
    MalformedTask { step_id: String, message: String },

    #[error("unknown processor order: {0}")]
    UnknownOrder(Order),

    #[error("processor failed: {0}")]
    ProcessorFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
