//! Object Store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
}

pub type ObjectStoreResult<T> = std::result::Result<T, ObjectStoreError>;

impl From<ObjectStoreError> for storypool_core::Error {
    fn from(err: ObjectStoreError) -> Self {
        match err {
            ObjectStoreError::UploadFailed(msg) => storypool_core::Error::Internal(msg),
        }
    }
}
