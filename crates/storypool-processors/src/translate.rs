//! Order 1: Korean-to-English translation.

use async_trait::async_trait;
use storypool_core::{PipelineId, Processor, StoreHandles};

use crate::http::call_text_service;

pub struct TranslateKoEn {
    client: reqwest::Client,
    url: String,
}

impl TranslateKoEn {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Processor for TranslateKoEn {
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
