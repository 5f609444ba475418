//! Port traits implemented by the storage and processor crates.
//!
//! The scheduler crate depends only on these traits, never on `redis` or
//! `sqlx` or `aws-sdk-s3` directly.

use async_trait::async_trait;

use crate::error::Result;
use crate::ids::{Order, PipelineId, StepId};
use crate::scene::SceneResult;
use crate::task::{Task, TaskStatus};

/// C1: keyed task records plus the dispatch queue (§4.1).
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Write a queued record and append its id to the dispatch queue.
    async fn create_task(
        &self,
        step_id: &StepId,
        pipeline_id: &PipelineId,
        order: Order,
        payload: &str,
    ) -> Result<()>;

    /// Block until a task id is available, then atomically mark it
    /// `processing` and return its fields.
    async fn claim_next(&self) -> Result<(StepId, Task)>;

    /// Write a terminal status and its result in one update.
    async fn complete(&self, step_id: &StepId, status: TaskStatus, result: &str) -> Result<()>;

    /// Read a task's fields (diagnostics / tests, not on the hot path).
    async fn read(&self, step_id: &StepId) -> Result<Task>;
}

/// C2: per-(pipeline, scene) upserts plus whole-pipeline assembly (§4.2).
#[async_trait]
pub trait SceneStore: Send + Sync {
    async fn put_story(&self, pipeline_id: &PipelineId, scene_number: i32, text: &str)
    -> Result<()>;

    async fn put_mood(&self, pipeline_id: &PipelineId, scene_number: i32, mood: &str)
    -> Result<()>;

    async fn put_image_url(
        &self,
        pipeline_id: &PipelineId,
        scene_number: i32,
        url: &str,
    ) -> Result<()>;

    /// All rows for a pipeline, ordered ascending by `scene_number`.
    async fn list_scenes(&self, pipeline_id: &PipelineId) -> Result<Vec<SceneResult>>;
}

/// C3: opaque byte upload returning a stable retrieval URL (§4.3).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, key: &str) -> Result<String>;
}
