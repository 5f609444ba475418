//! Processor error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Malformed(String),
}

pub type ProcessorResult<T> = std::result::Result<T, ProcessorError>;

impl From<ProcessorError> for storypool_core::Error {
    fn from(err: ProcessorError) -> Self {
        storypool_core::Error::ProcessorFailed(err.to_string())
    }
}
