//! C8: Pipeline Launcher ingress (§4.8, §6). Generates a fresh step id,
//! writes the root task (order=1, Korean-to-English translation) and
//! returns it to the caller. Everything past that point is the Worker
//! Loop's job.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;
use storypool_core::{Order, PipelineId, StepId};

/// Every pipeline begins at the Korean-to-English translator (§4.4).
const ROOT_ORDER: Order = 1;

pub fn router() -> Router<AppState> {
    Router::new().route("/enque", post(enqueue))
}

#[derive(Debug, Deserialize)]
struct EnqueueRequest {
    #[serde(rename = "pipelineId")]
    pipeline_id: String,
    #[serde(rename = "ocrResult")]
    ocr_result: String,
}

#[derive(Debug, Serialize)]
struct EnqueueResponse {
    message: String,
    #[serde(rename = "stepId")]
    step_id: String,
}

async fn enqueue(
    State(state): State<AppState>,
    Json(req): Json<EnqueueRequest>,
) -> Result<Json<EnqueueResponse>, ApiError> {
    if req.pipeline_id.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "pipelineId must not be empty".to_string(),
        ));
    }

    let step_id = StepId::new();
    let pipeline_id = PipelineId::new(req.pipeline_id);

    state
        .task_store
        .create_task(&step_id, &pipeline_id, ROOT_ORDER, &req.ocr_result)
        .await?;

    tracing::info!(pipeline_id = %pipeline_id, step_id = %step_id, "launched pipeline");

    Ok(Json(EnqueueResponse {
        message: "enqueued".to_string(),
        step_id: step_id.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::{Arc, Mutex};
    use storypool_core::{Task, TaskStatus, TaskStore};
    use tower::ServiceExt;

    #[derive(Default)]
    struct MockTaskStore {
        created: Mutex<Vec<(PipelineId, Order, String)>>,
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
                .unwrap()
                .push((pipeline_id.clone(), order, payload.to_string()));
            Ok(())
        }

        async fn claim_next(&self) -> storypool_core::Result<(StepId, Task)> {
            unimplemented!()
        }

        async fn complete(
            &self,
            _step_id: &StepId,
            _status: TaskStatus,
            _result: &str,
        ) -> storypool_core::Result<()> {
            unimplemented!()
        }

        async fn read(&self, _step_id: &StepId) -> storypool_core::Result<Task> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn enqueue_creates_a_root_order_task() {
        let task_store = Arc::new(MockTaskStore::default());
        let state = AppState::new(task_store.clone());
        let app = router().with_state(state);

        let body = serde_json::json!({ "pipelineId": "p1", "ocrResult": "hello" }).to_string();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/enque")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let created = task_store.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].1, ROOT_ORDER);
        assert_eq!(created[0].2, "hello");
    }

    #[tokio::test]
    async fn enqueue_rejects_empty_pipeline_id() {
        let task_store = Arc::new(MockTaskStore::default());
        let state = AppState::new(task_store.clone());
        let app = router().with_state(state);

        let body = serde_json::json!({ "pipelineId": "  ", "ocrResult": "hello" }).to_string();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/enque")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(task_store.created.lock().unwrap().is_empty());
    }
}
