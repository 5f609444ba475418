//! Order 31: per-scene English-to-Korean translation, one of the two
//! branches produced by the Fan-out Planner. Terminal: writes directly to
//! the Scene Store and enqueues no successor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storypool_core::{PipelineId, Processor, Result, StoreHandles};

use crate::error::ProcessorError;
use crate::http::call_text_service;

#[derive(Debug, Deserialize)]
struct SceneStoryEntry {
    scene_number: i32,
    story: String,
}

#[derive(Debug, Serialize)]
struct TranslatedEntry {
    scene_number: i32,
    story_ko: String,
}

pub struct TranslateBranch {
    client: reqwest::Client,
    url: String,
}

impl TranslateBranch {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Processor for TranslateBranch {
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
            storypool_core::Error::Internal("translation branch missing store handles".into())
        })?;

        let entries: Vec<SceneStoryEntry> = serde_json::from_str(payload)
            .map_err(|e| ProcessorError::Malformed(e.to_string()))?;

        let mut translated = Vec::with_capacity(entries.len());
        for entry in entries {
            match call_text_service(&self.client, &self.url, &entry.story).await {
                Ok(story_ko) => {
                    if let Err(e) = store
                        .scene_store
                        .put_story(pipeline_id, entry.scene_number, &story_ko)
                        .await
                    {
                        tracing::warn!(
                            scene_number = entry.scene_number,
                            error = %e,
                            "failed to persist translated scene story"
                        );
                        continue;
                    }
                    translated.push(TranslatedEntry {
                        scene_number: entry.scene_number,
                        story_ko,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        scene_number = entry.scene_number,
                        error = %e,
                        "translation branch failed for scene"
                    );
                }
            }
        }

        Ok(serde_json::to_string(&translated).unwrap_or_else(|_| "[]".to_string()))
    }
}
