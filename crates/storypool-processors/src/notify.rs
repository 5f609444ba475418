//! Order 6: Terminal Notifier (C7). Assembles the result document from the
//! Scene Store and POSTs it downstream. Never returns an error itself —
//! "success" or "failed" is recorded as the task result either way, with no
//! retry (§4.7).

use async_trait::async_trait;
use std::time::Duration;
use storypool_core::{PipelineId, Processor, Result, StoreHandles, scene::NotifyDocument};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TerminalNotify {
    client: reqwest::Client,
    base_url: String,
    notify_endpoint: String,
    service_token: String,
}

impl TerminalNotify {
    pub fn new(base_url: String, notify_endpoint: String, service_token: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(NOTIFY_TIMEOUT)
            .build()
            .expect("reqwest client builds with only a timeout set");
        Self {
            client,
            base_url,
            notify_endpoint,
            service_token,
        }
    }
}

#[async_trait]
impl Processor for TerminalNotify {
    fn needs_store(&self) -> bool {
        true
    }

    fn is_terminal(&self) -> bool {
        true
    }

    async fn invoke(
        &self,
        _payload: &str,
        pipeline_id: &PipelineId,
        store: Option<&StoreHandles>,
    ) -> Result<String> {
        let store = store.ok_or_else(|| {
            storypool_core::Error::Internal("terminal notifier missing store handles".into())
        })?;

        let rows = match store.scene_store.list_scenes(pipeline_id).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read scene rows for notification");
                return Ok("failed".to_string());
            }
        };

        let document = NotifyDocument::assemble(pipeline_id.as_str().to_string(), rows);
        let url = format!("{}{}", self.base_url, self.notify_endpoint);

        let outcome = self
            .client
            .post(&url)
            .bearer_auth(&self.service_token)
            .json(&document)
            .send()
            .await;

        match outcome {
            Ok(response) if response.status().is_success() => {
                tracing::info!(pipeline_id = %pipeline_id, "notification sent successfully");
                Ok("success".to_string())
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "notification endpoint rejected payload");
                Ok("failed".to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "notification request failed");
                Ok("failed".to_string())
            }
        }
    }
}
