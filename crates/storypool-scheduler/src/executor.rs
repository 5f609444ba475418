//! C5: Step Executor. Claims one task, resolves its processor, invokes it,
//! records the result and emits whatever successor work comes next (§4.5).
//!
//! Required-field verification happens upstream: `TaskStore::claim_next`
//! only ever hands back a fully-typed `Task` once `REQUIRED_FIELDS` parse
//! successfully, or an `Error::MalformedTask` carrying the offending
//! `step_id` otherwise — the type system does the verification instead of
//! a runtime field scan. The Worker Loop (`worker.rs`) is what reacts to
//! that error by marking the task failed, since it owns the claim/dispatch
//! boundary.

use std::sync::Arc;

use storypool_core::{Order, StepId, StoreHandles, Task, TaskStatus, TaskStore};
use storypool_processors::ProcessorEntry;
use tracing::{info, warn};

use crate::fanout::plan_fanout;

/// Order of the scene-parse step; its result is handed to the Fan-out
/// Planner instead of becoming a single linear successor (§4.5 step 5).
const SCENE_PARSE_ORDER: Order = 3;

pub struct StepExecutor {
    task_store: Arc<dyn TaskStore>,
    store: StoreHandles,
    registry: &'static std::collections::HashMap<Order, ProcessorEntry>,
}

impl StepExecutor {
    pub fn new(
        task_store: Arc<dyn TaskStore>,
        store: StoreHandles,
        registry: &'static std::collections::HashMap<Order, ProcessorEntry>,
    ) -> Self {
        Self {
            task_store,
            store,
            registry,
        }
    }

    /// Run one claimed task to completion. Never returns an error: every
    /// failure mode (unknown order, processor exception) is recorded on
    /// the task itself and the executor moves on, per §4.5 step 6 and §7.
    pub async fn execute(&self, step_id: &StepId, task: Task) {
        let Some(entry) = self.registry.get(&task.order) else {
            warn!(step_id = %step_id, order = task.order, "unknown processor order");
            self.fail(step_id, "unknown processor order").await;
            return;
        };

        let store = entry.needs_store.then_some(&self.store);
        match entry.processor.invoke(&task.payload, &task.pipeline_id, store).await {
            Ok(result) => {
                if let Err(e) = self
                    .task_store
                    .complete(step_id, TaskStatus::Done, &result)
                    .await
                {
                    warn!(step_id = %step_id, error = %e, "failed to record step completion");
                }

                if task.order == SCENE_PARSE_ORDER {
                    self.fan_out(&task, &result).await;
                } else if entry.is_terminal {
                    // produces no successor
                } else {
                    self.enqueue_successor(&task, task.order + 1, &result).await;
                }
            }
            Err(e) => {
                warn!(step_id = %step_id, order = task.order, error = %e, "processor failed");
                self.fail(step_id, &e.to_string()).await;
            }
        }
    }

    async fn fan_out(&self, task: &Task, scene_parse_result: &str) {
        match plan_fanout(task.order, scene_parse_result) {
            Ok(successors) => {
                for successor in successors {
                    self.enqueue_successor(task, successor.order, &successor.payload)
                        .await;
                }
            }
            Err(e) => {
                warn!(
                    pipeline_id = %task.pipeline_id,
                    error = %e,
                    "fan-out planning failed after scene parse"
                );
            }
        }
    }

    async fn enqueue_successor(&self, task: &Task, order: Order, payload: &str) {
        let step_id = StepId::new();
        if let Err(e) = self
            .task_store
            .create_task(&step_id, &task.pipeline_id, order, payload)
            .await
        {
            warn!(
                pipeline_id = %task.pipeline_id,
                order,
                error = %e,
                "failed to enqueue successor task"
            );
            return;
        }
        info!(pipeline_id = %task.pipeline_id, order, step_id = %step_id, "enqueued successor task");
    }

    async fn fail(&self, step_id: &StepId, message: &str) {
        if let Err(e) = self
            .task_store
            .complete(step_id, TaskStatus::Failed, message)
            .await
        {
            warn!(step_id = %step_id, error = %e, "failed to record task failure");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap as StdHashMap;
    use std::sync::Mutex;
    use storypool_core::{PipelineId, Processor};
    use tokio::sync::Mutex as AsyncMutex;

    struct MockProcessor {
        needs_store: bool,
        is_terminal: bool,
        outcome: Result<String, String>,
    }

    #[async_trait]
    impl Processor for MockProcessor {
        fn needs_store(&self) -> bool {
            self.needs_store
        }

        fn is_terminal(&self) -> bool {
            self.is_terminal
        }

        async fn invoke(
            &self,
            _payload: &str,
            _pipeline_id: &PipelineId,
            store: Option<&StoreHandles>,
        ) -> storypool_core::Result<String> {
            assert_eq!(store.is_some(), self.needs_store);
            self.outcome
                .clone()
                .map_err(storypool_core::Error::ProcessorFailed)
        }
    }

    #[derive(Default)]
    struct MockTaskStore {
        completed: Mutex<Vec<(StepId, TaskStatus, String)>>,
        created: AsyncMutex<Vec<(PipelineId, Order, String)>>,
    }

    #[async_trait]
    impl TaskStore for MockTaskStore {
        async fn create_task(
            &self,
            _step_id: &StepId,
            pipeline_id: &PipelineId,
            order: Order,
            payload: &str,
        ) -> storypool_core::Result<()> {
            self.created
                .lock()
                .await
                .push((pipeline_id.clone(), order, payload.to_string()));
            Ok(())
        }

        async fn claim_next(&self) -> storypool_core::Result<(StepId, Task)> {
            unimplemented!("not exercised by the executor in these tests")
        }

        async fn complete(
            &self,
            step_id: &StepId,
            status: TaskStatus,
            result: &str,
        ) -> storypool_core::Result<()> {
            self.completed
                .lock()
                .unwrap()
                .push((step_id.clone(), status, result.to_string()));
            Ok(())
        }

        async fn read(&self, _step_id: &StepId) -> storypool_core::Result<Task> {
            unimplemented!()
        }
    }

    fn mock_store_handles() -> StoreHandles {
        struct NullSceneStore;
        #[async_trait]
        impl storypool_core::SceneStore for NullSceneStore {
            async fn put_story(&self, _: &PipelineId, _: i32, _: &str) -> storypool_core::Result<()> {
                Ok(())
            }
            async fn put_mood(&self, _: &PipelineId, _: i32, _: &str) -> storypool_core::Result<()> {
                Ok(())
            }
            async fn put_image_url(&self, _: &PipelineId, _: i32, _: &str) -> storypool_core::Result<()> {
                Ok(())
            }
            async fn list_scenes(&self, _: &PipelineId) -> storypool_core::Result<Vec<storypool_core::SceneResult>> {
                Ok(vec![])
            }
        }
        struct NullObjectStore;
        #[async_trait]
        impl storypool_core::ObjectStore for NullObjectStore {
            async fn upload(&self, _: Vec<u8>, _: &str) -> storypool_core::Result<String> {
                Ok("https://example/x.png".to_string())
            }
        }
        StoreHandles {
            scene_store: Arc::new(NullSceneStore),
            object_store: Arc::new(NullObjectStore),
        }
    }

    fn leaked_registry(order: Order, entry: storypool_processors::ProcessorEntry) -> &'static StdHashMap<Order, storypool_processors::ProcessorEntry> {
        let mut map = StdHashMap::new();
        map.insert(order, entry);
        Box::leak(Box::new(map))
    }

    #[tokio::test]
    async fn linear_processor_enqueues_order_plus_one() {
        let registry = leaked_registry(
            1,
            storypool_processors::ProcessorEntry {
                needs_store: false,
                is_terminal: false,
                processor: Arc::new(MockProcessor {
                    needs_store: false,
                    is_terminal: false,
                    outcome: Ok("translated".to_string()),
                }),
            },
        );
        let task_store = Arc::new(MockTaskStore::default());
        let executor = StepExecutor::new(task_store.clone(), mock_store_handles(), registry);

        let task = Task::new_queued(StepId::new(), PipelineId::new("p1"), 1, "input");
        let step_id = task.step_id.clone();
        executor.execute(&step_id, task).await;

        let completed = task_store.completed.lock().unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].1, TaskStatus::Done);

        let created = task_store.created.lock().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].1, 2);
        assert_eq!(created[0].2, "translated");
    }

    #[tokio::test]
    async fn terminal_processor_enqueues_nothing() {
        let registry = leaked_registry(
            6,
            storypool_processors::ProcessorEntry {
                needs_store: true,
                is_terminal: true,
                processor: Arc::new(MockProcessor {
                    needs_store: true,
                    is_terminal: true,
                    outcome: Ok("success".to_string()),
                }),
            },
        );
        let task_store = Arc::new(MockTaskStore::default());
        let executor = StepExecutor::new(task_store.clone(), mock_store_handles(), registry);

        let task = Task::new_queued(StepId::new(), PipelineId::new("p1"), 6, "ignored");
        let step_id = task.step_id.clone();
        executor.execute(&step_id, task).await;

        assert_eq!(task_store.created.lock().await.len(), 0);
    }

    #[tokio::test]
    async fn unknown_order_marks_task_failed() {
        let registry: &'static StdHashMap<Order, storypool_processors::ProcessorEntry> =
            Box::leak(Box::new(StdHashMap::new()));
        let task_store = Arc::new(MockTaskStore::default());
        let executor = StepExecutor::new(task_store.clone(), mock_store_handles(), registry);

        let task = Task::new_queued(StepId::new(), PipelineId::new("p1"), 99, "x");
        let step_id = task.step_id.clone();
        executor.execute(&step_id, task).await;

        let completed = task_store.completed.lock().unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].1, TaskStatus::Failed);
        assert_eq!(task_store.created.lock().await.len(), 0);
    }

    #[tokio::test]
    async fn processor_failure_marks_task_failed_with_no_successor() {
        let registry = leaked_registry(
            2,
            storypool_processors::ProcessorEntry {
                needs_store: false,
                is_terminal: false,
                processor: Arc::new(MockProcessor {
                    needs_store: false,
                    is_terminal: false,
                    outcome: Err("story service unavailable".to_string()),
                }),
            },
        );
        let task_store = Arc::new(MockTaskStore::default());
        let executor = StepExecutor::new(task_store.clone(), mock_store_handles(), registry);

        let task = Task::new_queued(StepId::new(), PipelineId::new("p1"), 2, "x");
        let step_id = task.step_id.clone();
        executor.execute(&step_id, task).await;

        let completed = task_store.completed.lock().unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].1, TaskStatus::Failed);
        assert_eq!(task_store.created.lock().await.len(), 0);
    }

    #[tokio::test]
    async fn scene_parse_result_hands_off_to_fan_out_planner() {
        let registry = leaked_registry(
            3,
            storypool_processors::ProcessorEntry {
                needs_store: false,
                is_terminal: false,
                processor: Arc::new(MockProcessor {
                    needs_store: false,
                    is_terminal: false,
                    outcome: Ok(serde_json::json!({
                        "scenes": [
                            {"scene_number": 1, "mood": "calm", "story": "Emma woke up"}
                        ]
                    })
                    .to_string()),
                }),
            },
        );
        let task_store = Arc::new(MockTaskStore::default());
        let executor = StepExecutor::new(task_store.clone(), mock_store_handles(), registry);

        let task = Task::new_queued(StepId::new(), PipelineId::new("p1"), 3, "story text");
        let step_id = task.step_id.clone();
        executor.execute(&step_id, task).await;

        let created = task_store.created.lock().await;
        assert_eq!(created.len(), 3);
        let orders: Vec<Order> = created.iter().map(|(_, order, _)| *order).collect();
        assert_eq!(orders, vec![4, 31, 32]);
    }
}
