//! S3 object store adapter for the narrative pipeline core.

pub mod error;
pub mod s3;

pub use error::{ObjectStoreError, ObjectStoreResult};
pub use s3::{S3ObjectStore, scene_key};
