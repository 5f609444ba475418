//! Order 5: image generation. Not terminal — its successor is the Terminal
//! Notifier (order 6), enqueued by the Step Executor the same way any other
//! linear step's successor is. The translation (31) and emotion (32)
//! branches are enqueued separately by the Fan-out Planner, not by this
//! processor.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::json;
use storypool_core::{Error, PipelineId, Processor, Result, StoreHandles};

use crate::error::ProcessorError;

#[derive(Debug, Deserialize)]
struct PromptSet {
    prompts: Vec<PromptEntry>,
}

#[derive(Debug, Deserialize)]
struct PromptEntry {
    scene_number: i32,
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    image_base64: String,
}

#[derive(Debug, Serialize)]
struct UploadedImage {
    scene_number: i32,
    url: String,
}

pub struct ImageGenerate {
    client: reqwest::Client,
    url: String,
}

impl ImageGenerate {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    async fn generate_one(&self, prompt: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(ProcessorError::from)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProcessorError::Upstream {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        let parsed: ImageResponse = response.json().await.map_err(ProcessorError::from)?;
        BASE64
            .decode(parsed.image_base64)
            .map_err(|e| Error::ProcessorFailed(format!("invalid image encoding: {e}")))
    }
}

#[async_trait]
impl Processor for ImageGenerate {
    fn needs_store(&self) -> bool {
        true
    }

    fn is_terminal(&self) -> bool {
        false
    }

    async fn invoke(
        &self,
        payload: &str,
        pipeline_id: &PipelineId,
        store: Option<&StoreHandles>,
    ) -> Result<String> {
        let store = store.ok_or_else(|| Error::Internal("image step missing store handles".into()))?;

        let parsed: PromptSet = serde_json::from_str(payload)
            .map_err(|e| ProcessorError::Malformed(e.to_string()))?;

        let mut uploaded = Vec::with_capacity(parsed.prompts.len());
        for entry in &parsed.prompts {
            let bytes = self.generate_one(&entry.prompt).await?;
            let key = format!("{}/scene_{}.png", pipeline_id.as_str(), entry.scene_number);
            let url = store.object_store.upload(bytes, &key).await?;
            store
                .scene_store
                .put_image_url(pipeline_id, entry.scene_number, &url)
                .await?;
            uploaded.push(UploadedImage {
                scene_number: entry.scene_number,
                url,
            });
        }

        Ok(serde_json::to_string(&uploaded).unwrap_or_else(|_| "success".to_string()))
    }
}
