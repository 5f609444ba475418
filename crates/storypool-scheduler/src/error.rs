//! Scheduler error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scene-parse result could not be split for fan-out: {0}")]
    MalformedFanoutInput(String),
}

pub type SchedulerResult<T> = std::result::Result<T, SchedulerError>;
