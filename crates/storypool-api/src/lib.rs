//! Pipeline Launcher (C8) HTTP ingress for the narrative pipeline core.
//!
//! Exposes `POST /enque` (§6) plus the ambient health/readiness pair. This
//! crate owns no pipeline logic itself — it generates a root step id and
//! hands it to the Task Store.

pub mod error;
pub mod routes;
pub mod state;

pub use state::AppState;
