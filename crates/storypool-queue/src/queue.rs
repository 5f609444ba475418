//! Redis-backed Task Store (C1, §4.1) and dispatch queue (§6).
//!
//! Task records live at `task:{step_id}` as a Redis hash; the dispatch
//! queue is the list key `task_queue`, popped with a blocking `BRPOP`.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use storypool_core::{Order, PipelineId, StepId, Task, TaskStatus};

use crate::error::{QueueError, QueueResult};

const TASK_QUEUE_KEY: &str = "task_queue";
/// `BRPOP` is re-issued with this timeout so the worker loop can observe a
/// shutdown signal between blocking calls, rather than blocking forever on
/// a single call (see SPEC_FULL.md's REDESIGN FLAGS).
const CLAIM_POLL_TIMEOUT: Duration = Duration::from_secs(5);

fn task_key(step_id: &StepId) -> String {
    format!("task:{}", step_id.as_str())
}

/// Task Store backed by a multiplexed, auto-reconnecting Redis connection.
#[derive(Clone)]
pub struct RedisTaskStore {
    conn: ConnectionManager,
}

impl RedisTaskStore {
    pub async fn connect(redis_url: &str) -> QueueResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }

    pub fn from_connection_manager(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    async fn hgetall(&self, step_id: &StepId) -> QueueResult<HashMap<String, String>> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn.hgetall(task_key(step_id)).await?;
        Ok(fields)
    }

    pub async fn create_task_raw(
        &self,
        step_id: &StepId,
        pipeline_id: &PipelineId,
        order: Order,
        payload: &str,
    ) -> QueueResult<()> {
        let key = task_key(step_id);
        let mut conn = self.conn.clone();
        let fields: [(&str, String); 4] = [
            ("status", TaskStatus::Queued.to_string()),
            ("payload", payload.to_string()),
            ("pipelineId", pipeline_id.as_str().to_string()),
            ("order", order.to_string()),
        ];
        conn.hset_multiple::<_, _, _, ()>(&key, &fields).await?;
        conn.lpush::<_, _, ()>(TASK_QUEUE_KEY, step_id.as_str())
            .await?;
        Ok(())
    }

    pub async fn claim_next_raw(&self) -> QueueResult<(StepId, Task)> {
        let mut conn = self.conn.clone();
        loop {
            let popped: Option<(String, String)> = conn
                .brpop(TASK_QUEUE_KEY, CLAIM_POLL_TIMEOUT.as_secs_f64())
                .await?;
            let Some((_list, step_id_raw)) = popped else {
                debug!("claim_next: no task within poll window, retrying");
                continue;
            };

            let step_id = StepId::from(step_id_raw);
            let fields = self.hgetall(&step_id).await?;
            if fields.is_empty() {
                warn!(step_id = %step_id, "claimed step id with no hash record");
                continue;
            }

            conn.hset::<_, _, _, ()>(task_key(&step_id), "status", TaskStatus::Processing.to_string())
                .await?;

            let task = parse_task(&step_id, &fields)?;
            return Ok((step_id, task));
        }
    }

    pub async fn complete_raw(
        &self,
        step_id: &StepId,
        status: TaskStatus,
        result: &str,
    ) -> QueueResult<()> {
        let mut conn = self.conn.clone();
        let fields: [(&str, String); 2] =
            [("status", status.to_string()), ("result", result.to_string())];
        conn.hset_multiple::<_, _, _, ()>(task_key(step_id), &fields)
            .await?;
        Ok(())
    }

    pub async fn read_raw(&self, step_id: &StepId) -> QueueResult<Task> {
        let fields = self.hgetall(step_id).await?;
        if fields.is_empty() {
            return Err(QueueError::NotFound(step_id.to_string()));
        }
        parse_task(step_id, &fields)
    }
}

fn malformed(step_id: &StepId, message: impl Into<String>) -> QueueError {
    QueueError::Malformed {
        step_id: step_id.to_string(),
        message: message.into(),
    }
}

fn parse_task(step_id: &StepId, fields: &HashMap<String, String>) -> QueueResult<Task> {
    let pipeline_id = fields
        .get("pipelineId")
        .ok_or_else(|| malformed(step_id, "missing pipelineId"))?
        .clone();
    let order: Order = fields
        .get("order")
        .ok_or_else(|| malformed(step_id, "missing order"))?
        .parse()
        .map_err(|_| malformed(step_id, "order is not an integer"))?;
    let status_raw = fields
        .get("status")
        .ok_or_else(|| malformed(step_id, "missing status"))?;
    let status: TaskStatus = status_raw
        .parse()
        .map_err(|_: storypool_core::Error| malformed(step_id, format!("bad status {status_raw:?}")))?;
    let payload = fields
        .get("payload")
        .ok_or_else(|| malformed(step_id, "missing payload"))?
        .clone();
    let result = fields.get("result").cloned();

    Ok(Task {
        step_id: step_id.clone(),
        pipeline_id: PipelineId::from(pipeline_id),
        order,
        status,
        payload,
        result,
    })
}

#[async_trait]
impl storypool_core::TaskStore for RedisTaskStore {
    async fn create_task(
        &self,
        step_id: &StepId,
        pipeline_id: &PipelineId,
        order: Order,
        payload: &str,
    ) -> storypool_core::Result<()> {
        self.create_task_raw(step_id, pipeline_id, order, payload)
            .await
            .map_err(Into::into)
    }

    async fn claim_next(&self) -> storypool_core::Result<(StepId, Task)> {
        self.claim_next_raw().await.map_err(Into::into)
    }

    async fn complete(
        &self,
        step_id: &StepId,
        status: TaskStatus,
        result: &str,
    ) -> storypool_core::Result<()> {
        self.complete_raw(step_id, status, result)
            .await
            .map_err(Into::into)
    }

    async fn read(&self, step_id: &StepId) -> storypool_core::Result<Task> {
        self.read_raw(step_id).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_task_rejects_missing_fields() {
        let step_id = StepId::new();
        let mut fields = HashMap::new();
        fields.insert("status".to_string(), "queued".to_string());
        fields.insert("payload".to_string(), "hi".to_string());
        // pipelineId and order deliberately missing
        let err = parse_task(&step_id, &fields).unwrap_err();
        match err {
            QueueError::Malformed { step_id: sid, .. } => assert_eq!(sid, step_id.to_string()),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn parse_task_accepts_complete_record() {
        let step_id = StepId::new();
        let mut fields = HashMap::new();
        fields.insert("status".to_string(), "done".to_string());
        fields.insert("payload".to_string(), "hi".to_string());
        fields.insert("pipelineId".to_string(), "p1".to_string());
        fields.insert("order".to_string(), "2".to_string());
        fields.insert("result".to_string(), "bye".to_string());

        let task = parse_task(&step_id, &fields).unwrap();
        assert_eq!(task.order, 2);
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.result.as_deref(), Some("bye"));
    }
}
