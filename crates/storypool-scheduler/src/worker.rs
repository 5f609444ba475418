//! C9: Worker Loop. A long-lived consumer that blocks on the dispatch
//! queue, invokes the Step Executor, and recovers from both malformed
//! records and processor failures without ever retrying a task (§4.9).

use std::sync::Arc;
use std::time::Duration;

use storypool_core::{Error, StepId, TaskStatus, TaskStore};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::executor::StepExecutor;

const RETRY_BACKOFF: Duration = Duration::from_secs(1);

pub struct WorkerLoop {
    id: String,
    task_store: Arc<dyn TaskStore>,
    step_executor: Arc<StepExecutor>,
}

impl WorkerLoop {
    pub fn new(id: impl Into<String>, task_store: Arc<dyn TaskStore>, step_executor: Arc<StepExecutor>) -> Self {
        Self {
            id: id.into(),
            task_store,
            step_executor,
        }
    }

    /// Run forever. Each iteration claims exactly one task; no two workers
    /// running this loop against the same Task Store observe the same
    /// `step_id` (§5 "Shared resource policy").
    pub async fn run(&self) {
        info!(worker_id = %self.id, "starting worker loop");

        loop {
            match self.task_store.claim_next().await {
                Ok((step_id, task)) => {
                    info!(worker_id = %self.id, step_id = %step_id, order = task.order, "claimed task");
                    self.step_executor.execute(&step_id, task).await;
                }
                Err(Error::MalformedTask { step_id, message }) => {
                    warn!(worker_id = %self.id, step_id = %step_id, message, "claimed malformed task record");
                    let step_id = StepId::from(step_id);
                    if let Err(e) = self
                        .task_store
                        .complete(&step_id, TaskStatus::Failed, &message)
                        .await
                    {
                        warn!(worker_id = %self.id, step_id = %step_id, error = %e, "failed to mark malformed task failed");
                    }
                }
                Err(e) => {
                    warn!(worker_id = %self.id, error = %e, "failed to claim next task");
                    sleep(RETRY_BACKOFF).await;
                }
            }
        }
    }
}
