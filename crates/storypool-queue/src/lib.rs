//! Redis-backed Task Store for the narrative pipeline core.

pub mod error;
pub mod queue;

pub use error::{QueueError, QueueResult};
pub use queue::RedisTaskStore;
