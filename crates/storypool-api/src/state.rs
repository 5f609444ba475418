//! Application state for the Pipeline Launcher.

use std::sync::Arc;

use storypool_core::TaskStore;

/// Shared application state. The Launcher depends only on the Task Store
/// port (§4.8) — it never touches the Scene Store or Object Store.
#[derive(Clone)]
pub struct AppState {
    pub task_store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(task_store: Arc<dyn TaskStore>) -> Self {
        Self { task_store }
    }
}
