//! S3-backed Object Store Adapter (C3, §4.3).

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use tracing::info;

use crate::error::{ObjectStoreError, ObjectStoreResult};

/// Uploads scene images with a fixed content-type and public-read ACL,
/// returning the bucket's virtual-host-style URL (§4.3). Credentials and
/// region come from configuration, not from the ambient AWS credential
/// chain, since this talks to one fixed bucket with long-lived access
/// keys.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            region: region.into(),
        }
    }

    /// Build a client from long-lived static credentials rather than the
    /// ambient IMDS/SSO chain.
    pub async fn from_static_credentials(
        region: impl Into<String>,
        bucket: impl Into<String>,
        access_key: &str,
        secret_key: &str,
    ) -> Self {
        let region = region.into();
        let credentials = aws_sdk_s3::config::Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "storypool-static",
        );
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;
        let client = aws_sdk_s3::Client::new(&config);
        Self::new(client, bucket, region)
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

#[async_trait]
impl storypool_core::ObjectStore for S3ObjectStore {
    async fn upload(&self, bytes: Vec<u8>, key: &str) -> storypool_core::Result<String> {
        self.upload_raw(bytes, key).await.map_err(Into::into)
    }
}

impl S3ObjectStore {
    pub async fn upload_raw(&self, bytes: Vec<u8>, key: &str) -> ObjectStoreResult<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type("image/png")
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| ObjectStoreError::UploadFailed(e.to_string()))?;

        let url = self.public_url(key);
        info!(key = %key, url = %url, "uploaded scene image");
        Ok(url)
    }
}

/// Build the deterministic key for a scene image (§4.3: `{pipeline_id}/scene_{n}.png`).
pub fn scene_key(pipeline_id: &str, scene_number: i32) -> String {
    format!("{pipeline_id}/scene_{scene_number}.png")
}
