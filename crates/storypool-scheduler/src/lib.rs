//! Step Executor (C5), Fan-out Planner (C6) and Worker Loop driver (C9) for
//! the narrative pipeline core.

pub mod error;
pub mod executor;
pub mod fanout;
pub mod worker;

pub use error::{SchedulerError, SchedulerResult};
pub use executor::StepExecutor;
pub use fanout::{PlannedSuccessor, plan_fanout};
pub use worker::WorkerLoop;
