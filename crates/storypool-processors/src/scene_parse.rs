//! Order 3: scene parsing. Its output feeds the Fan-out Planner, not a
//! linear successor; the Step Executor special-cases `order == 3` rather
//! than relying on a registry flag, so this processor looks like any other
//! pure text-in/text-out stand-in from the registry's point of view.

use async_trait::async_trait;
use storypool_core::{PipelineId, Processor, StoreHandles};

use crate::http::call_text_service;

pub struct SceneParse {
    client: reqwest::Client,
    url: String,
}

impl SceneParse {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Processor for SceneParse {
    fn needs_store(&self) -> bool {
        false
    }

    fn is_terminal(&self) -> bool {
        false
    }

    async fn invoke(
        &self,
        payload: &str,
        _pipeline_id: &PipelineId,
        _store: Option<&StoreHandles>,
    ) -> storypool_core::Result<String> {
        call_text_service(&self.client, &self.url, payload)
            .await
            .map_err(Into::into)
    }
}
