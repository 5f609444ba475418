//! Shared domain types and port traits for the narrative pipeline core.
//!
//! This crate contains:
//! - Step/pipeline identifiers
//! - Task lifecycle and Scene Store row types
//! - The `TaskStore` / `SceneStore` / `ObjectStore` / `Processor` port traits
//!   implemented by the storage and processor crates

pub mod error;
pub mod ids;
pub mod ports;
pub mod processor;
pub mod scene;
pub mod task;

pub use error::{Error, Result};
pub use ids::{Order, PipelineId, StepId};
pub use ports::{ObjectStore, SceneStore, TaskStore};
pub use processor::{Processor, StoreHandles};
pub use scene::{NotifyDocument, PageEntry, SceneResult};
pub use task::{REQUIRED_FIELDS, Task, TaskStatus};
