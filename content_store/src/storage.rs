use aws_sdk_s3::primitives::ByteStream;

use crate::error::StoreError;

/// The media object bucket behind avatar and logo uploads. Upload keys are
/// namespaced by entity kind (`avatars/…`, `logos/…`) and uploads overwrite
/// on key conflict.
pub trait ObjectStorage: Clone + Send + Sync + 'static {
    /// Stores the object and returns its public URL.
    fn upload(
        &self,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    fn delete(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn public_url(&self, key: &str) -> String;

    /// Maps a public URL back to this bucket's object key. Returns `None`
    /// for externally-hosted URLs, which must never be deleted.
    fn object_key(&self, url: &str) -> Option<String>;
}

/// Strips `base` (the bucket's public URL prefix) off `url`, yielding the
/// object key for URLs this bucket hosts.
#[must_use]
pub fn key_from_public_url(base: &str, url: &str) -> Option<String> {
    url.strip_prefix(base)
        .filter(|key| !key.is_empty())
        .map(ToString::to_string)
}

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Storage {
    #[must_use]
    pub const fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    fn base_url(&self) -> String {
        format!("https://{bucket}.s3.amazonaws.com/", bucket = self.bucket)
    }
}

impl ObjectStorage for S3Storage {
    #[tracing::instrument(skip(self, body))]
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<String, StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("S3 PutObject error for {key}: {e}");
                StoreError::Storage(format!("failed to upload {key}"))
            })?;

        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("S3 DeleteObject error for {key}: {e}");
                StoreError::Storage(format!("failed to delete {key}"))
            })?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{base}{key}", base = self.base_url())
    }

    fn object_key(&self, url: &str) -> Option<String> {
        key_from_public_url(&self.base_url(), url)
    }
}
