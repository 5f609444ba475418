//! Repository implementations.

pub mod scene;

pub use scene::PgSceneStore;
