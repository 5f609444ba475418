//! Task Store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("task not found: {0}")]
    NotFound(String),

    #[error("malformed task record {step_id}: {message}")]
    Malformed { step_id: String, message: String },
}

pub type QueueResult<T> = std::result::Result<T, QueueError>;

impl From<QueueError> for storypool_core::Error {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::NotFound(msg) => storypool_core::Error::NotFound(msg),
            QueueError::Malformed { step_id, message } => {
                storypool_core::Error::MalformedTask { step_id, message }
            }
            QueueError::Redis(e) => storypool_core::Error::Internal(e.to_string()),
        }
    }
}
