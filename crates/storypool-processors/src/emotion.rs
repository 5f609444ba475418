//! Order 32: per-scene emotion classification, the second fan-out branch.
//! Terminal: writes directly to the Scene Store and enqueues no successor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storypool_core::{PipelineId, Processor, Result, StoreHandles};

use crate::error::ProcessorError;
use crate::http::call_text_service;

#[derive(Debug, Deserialize)]
struct SceneMoodEntry {
    scene_number: i32,
    mood: String,
}

#[derive(Debug, Serialize)]
struct ClassifiedEntry {
    scene_number: i32,
    emotion: String,
}

pub struct EmotionBranch {
    client: reqwest::Client,
    url: String,
}

impl EmotionBranch {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Processor for EmotionBranch {
    fn needs_store(&self) -> bool {
        true
    }

    fn is_terminal(&self) -> bool {
        true
    }

    async fn invoke(
        &self,
        payload: &str,
        pipeline_id: &PipelineId,
        store: Option<&StoreHandles>,
    ) -> Result<String> {
        let store = store.ok_or_else(|| {
            storypool_core::Error::Internal("emotion branch missing store handles".into())
        })?;

        let entries: Vec<SceneMoodEntry> = serde_json::from_str(payload)
            .map_err(|e| ProcessorError::Malformed(e.to_string()))?;

        let mut classified = Vec::with_capacity(entries.len());
        for entry in entries {
            let emotion = match call_text_service(&self.client, &self.url, &entry.mood).await {
                Ok(result) if !result.is_empty() => result,
                Ok(_) => "unknown".to_string(),
                Err(e) => {
                    tracing::warn!(
                        scene_number = entry.scene_number,
                        error = %e,
                        "emotion classification failed for scene, recording error"
                    );
                    "error".to_string()
                }
            };

            if let Err(e) = store
                .scene_store
                .put_mood(pipeline_id, entry.scene_number, &emotion)
                .await
            {
                tracing::warn!(
                    scene_number = entry.scene_number,
                    error = %e,
                    "failed to persist scene mood"
                );
                continue;
            }

            classified.push(ClassifiedEntry {
                scene_number: entry.scene_number,
                emotion,
            });
        }

        Ok(serde_json::to_string(&classified).unwrap_or_else(|_| "[]".to_string()))
    }
}
