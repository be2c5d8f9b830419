//! Upload orchestration for avatars and logos. Objects are keyed
//! `{kind}/{entity_id}_{upload_millis}.{ext}` and uploads overwrite on
//! conflict, so re-uploading for the same entity never collides with a
//! different entity's files.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use content_store::ObjectStorage;
use types::FileUpload;

use crate::error::ApiError;

pub const AVATAR_PREFIX: &str = "avatars";
pub const LOGO_PREFIX: &str = "logos";

#[must_use]
pub fn object_key(
    prefix: &str,
    entity_id: &str,
    upload: &FileUpload,
    uploaded_at: DateTime<Utc>,
) -> String {
    let extension = upload.extension().unwrap_or("bin");

    format!(
        "{prefix}/{entity_id}_{millis}.{extension}",
        millis = uploaded_at.timestamp_millis()
    )
}

/// Decodes and stores an uploaded file, returning its public URL.
pub async fn store_upload<O: ObjectStorage>(
    storage: &O,
    prefix: &str,
    entity_id: &str,
    upload: &FileUpload,
) -> Result<String, ApiError> {
    let bytes = BASE64.decode(&upload.data).map_err(|e| {
        tracing::error!(
            "failed to decode upload {file_name}: {e}",
            file_name = upload.file_name
        );
        ApiError::InvalidUpload
    })?;

    let key = object_key(prefix, entity_id, upload, Utc::now());

    let url = storage.upload(&key, &upload.content_type, bytes).await?;

    Ok(url)
}

/// Best-effort removal of the object backing a stored URL. Externally
/// hosted URLs do not map to an object key and are left untouched; a
/// failed deletion is logged, never surfaced.
pub async fn remove_backing_object<O: ObjectStorage>(storage: &O, url: &str) {
    let Some(key) = storage.object_key(url) else {
        return;
    };

    if let Err(e) = storage.delete(&key).await {
        tracing::warn!("failed to delete object {key}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_template() {
        let upload = FileUpload {
            file_name: "portrait.png".to_string(),
            content_type: "image/png".to_string(),
            data: String::new(),
        };
        let uploaded_at: DateTime<Utc> =
            "2025-06-01T12:00:00Z".parse().unwrap();

        let key = object_key(AVATAR_PREFIX, "g1", &upload, uploaded_at);

        assert_eq!(
            key,
            format!("avatars/g1_{}.png", uploaded_at.timestamp_millis())
        );
    }

    #[test]
    fn test_object_key_without_extension_falls_back() {
        let upload = FileUpload {
            file_name: "portrait".to_string(),
            content_type: "application/octet-stream".to_string(),
            data: String::new(),
        };

        let key = object_key(LOGO_PREFIX, "s1", &upload, Utc::now());

        assert!(key.starts_with("logos/s1_"));
        assert!(key.ends_with(".bin"));
    }
}
