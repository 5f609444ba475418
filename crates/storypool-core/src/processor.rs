//! The processor capability contract (§9 "Polymorphism").
//!
//! Processors share a minimal contract — `needs_store`, `is_terminal`,
//! `invoke`. There is no class hierarchy; the Processor Registry dispatches
//! on `order` via a table of `Arc<dyn Processor>`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::ids::PipelineId;
use crate::ports::{ObjectStore, SceneStore};

/// Store handles passed to processors that declare `needs_store() == true`.
#[derive(Clone)]
pub struct StoreHandles {
    pub scene_store: Arc<dyn SceneStore>,
    pub object_store: Arc<dyn ObjectStore>,
}

/// A single step's processing logic.
///
/// `needs_store` corresponds to orders 5, 31, 32, 6 in the Processor
/// Registry table (§4.4): these either write Scene Store rows directly or
/// (for order 6) read them back for assembly. `is_terminal` is true for
/// orders 31, 32 and 6 — each produces no queued successor. Order 5 needs
/// the store but is not terminal: its successor is order 6.
#[async_trait]
pub trait Processor: Send + Sync {
    fn needs_store(&self) -> bool;

    fn is_terminal(&self) -> bool;

    /// Run the processor. `store` is `Some` iff `needs_store()` is true.
    async fn invoke(
        &self,
        payload: &str,
        pipeline_id: &PipelineId,
        store: Option<&StoreHandles>,
    ) -> Result<String>;
}
