use async_trait::async_trait;
use axum::body::Bytes;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info};

/// Maximum accepted preview image size (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An uploaded preview image as received from the form
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Bytes,
    pub content_type: String,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Unsupported image type '{0}': expected JPEG, PNG or WebP")]
    UnsupportedType(String),

    #[error("Image too large: {0} bytes (limit {MAX_IMAGE_BYTES})")]
    TooLarge(usize),

    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("Image deletion failed: {0}")]
    Delete(String),
}

/// Check the content type and size of an upload, returning the file
/// extension to store it under.
pub fn validate_image(image: &ImageUpload) -> Result<&'static str, MediaError> {
    let ext = match image.content_type.as_str() {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        other => return Err(MediaError::UnsupportedType(other.to_string())),
    };

    if image.data.len() > MAX_IMAGE_BYTES {
        return Err(MediaError::TooLarge(image.data.len()));
    }

    Ok(ext)
}

/// Build a unique object key for an upload, e.g. `project_1735689600000.png`.
fn object_key(ext: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("project_{}.{}", millis, ext)
}

/// Storage backend for preview images.
///
/// `upload` validates the image, stores it, and returns the public URL.
/// `delete` removes the object behind a previously returned URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError>;

    async fn delete(&self, url: &str) -> Result<(), MediaError>;
}

/// Supabase Storage connection settings
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Base URL of the Supabase instance, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Service role key used for authenticated storage calls
    pub service_key: String,
    /// Bucket holding the preview images
    pub bucket: String,
}

/// Environment variables:
/// - `SUPABASE_URL` (required)
/// - `SUPABASE_SERVICE_ROLE_KEY` (required)
/// - `SUPABASE_BUCKET` (default: project-preview)
impl FromEnv for SupabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            service_key: env_required("SUPABASE_SERVICE_ROLE_KEY")?,
            bucket: env_or_default("SUPABASE_BUCKET", "project-preview"),
        })
    }
}

/// Media store backed by the Supabase Storage HTTP API
pub struct SupabaseMediaStore {
    client: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseMediaStore {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.url, self.config.bucket, key
        )
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url, self.config.bucket, key
        )
    }

    /// Recover the object key from a public URL.
    ///
    /// Looks for the bucket segment in the path and takes everything
    /// after it. Falls back to the final path segment for URLs that do
    /// not contain the bucket name.
    fn extract_key<'a>(&self, url: &'a str) -> Option<&'a str> {
        let path = url.split('?').next().unwrap_or(url);

        if let Some(idx) = path.find(&format!("/{}/", self.config.bucket)) {
            let key = &path[idx + self.config.bucket.len() + 2..];
            if !key.is_empty() {
                return Some(key);
            }
        }

        path.rsplit('/').next().filter(|s| !s.is_empty())
    }
}

#[async_trait]
impl MediaStore for SupabaseMediaStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError> {
        let ext = validate_image(&image)?;
        let key = object_key(ext);

        let response = self
            .client
            .post(self.object_url(&key))
            .bearer_auth(&self.config.service_key)
            .header(reqwest::header::CONTENT_TYPE, &image.content_type)
            .body(image.data)
            .send()
            .await
            .map_err(|e| MediaError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Upload(format!("{}: {}", status, body)));
        }

        info!(key = %key, "Uploaded preview image");
        Ok(self.public_url(&key))
    }

    async fn delete(&self, url: &str) -> Result<(), MediaError> {
        let Some(key) = self.extract_key(url) else {
            return Err(MediaError::Delete(format!("no object key in URL: {}", url)));
        };

        let response = self
            .client
            .delete(self.object_url(key))
            .bearer_auth(&self.config.service_key)
            .send()
            .await
            .map_err(|e| MediaError::Delete(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MediaError::Delete(format!(
                "{} for key {}",
                response.status(),
                key
            )));
        }

        debug!(key = %key, "Deleted preview image");
        Ok(())
    }
}

/// In-memory media store for development and tests
#[derive(Debug, Default, Clone)]
pub struct InMemoryMediaStore {
    objects: std::sync::Arc<tokio::sync::RwLock<std::collections::HashMap<String, Bytes>>>,
    base_url: String,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self {
            objects: Default::default(),
            base_url: "https://media.invalid/storage/v1/object/public/project-preview".to_string(),
        }
    }

    pub async fn contains(&self, url: &str) -> bool {
        let key = url.rsplit('/').next().unwrap_or(url);
        self.objects.read().await.contains_key(key)
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError> {
        let ext = validate_image(&image)?;
        let key = object_key(ext);
        self.objects.write().await.insert(key.clone(), image.data);
        Ok(format!("{}/{}", self.base_url, key))
    }

    async fn delete(&self, url: &str) -> Result<(), MediaError> {
        let key = url
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| MediaError::Delete(format!("no object key in URL: {}", url)))?;

        self.objects
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| MediaError::Delete(format!("unknown object: {}", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_upload(len: usize) -> ImageUpload {
        ImageUpload {
            data: Bytes::from(vec![0u8; len]),
            content_type: "image/png".to_string(),
        }
    }

    #[test]
    fn accepts_supported_image_types() {
        for (mime, ext) in [
            ("image/jpeg", "jpg"),
            ("image/png", "png"),
            ("image/webp", "webp"),
        ] {
            let image = ImageUpload {
                data: Bytes::from_static(b"data"),
                content_type: mime.to_string(),
            };
            assert_eq!(validate_image(&image).unwrap(), ext);
        }
    }

    #[test]
    fn rejects_unsupported_image_type() {
        let image = ImageUpload {
            data: Bytes::from_static(b"GIF89a"),
            content_type: "image/gif".to_string(),
        };
        assert!(matches!(
            validate_image(&image),
            Err(MediaError::UnsupportedType(_))
        ));
    }

    #[test]
    fn rejects_oversized_image() {
        let image = png_upload(MAX_IMAGE_BYTES + 1);
        assert!(matches!(
            validate_image(&image),
            Err(MediaError::TooLarge(_))
        ));
    }

    #[test]
    fn accepts_image_at_size_limit() {
        let image = png_upload(MAX_IMAGE_BYTES);
        assert!(validate_image(&image).is_ok());
    }

    #[test]
    fn object_key_uses_project_prefix_and_extension() {
        let key = object_key("webp");
        assert!(key.starts_with("project_"));
        assert!(key.ends_with(".webp"));
    }

    #[test]
    fn extract_key_finds_segment_after_bucket() {
        let store = SupabaseMediaStore::new(SupabaseConfig {
            url: "https://xyz.supabase.co".to_string(),
            service_key: "key".to_string(),
            bucket: "project-preview".to_string(),
        });

        let url =
            "https://xyz.supabase.co/storage/v1/object/public/project-preview/project_1.png";
        assert_eq!(store.extract_key(url), Some("project_1.png"));
    }

    #[test]
    fn extract_key_falls_back_to_last_segment() {
        let store = SupabaseMediaStore::new(SupabaseConfig {
            url: "https://xyz.supabase.co".to_string(),
            service_key: "key".to_string(),
            bucket: "project-preview".to_string(),
        });

        let url = "https://cdn.example.com/uploads/project_2.jpg";
        assert_eq!(store.extract_key(url), Some("project_2.jpg"));
    }

    #[test]
    fn supabase_config_from_env() {
        temp_env::with_vars(
            [
                ("SUPABASE_URL", Some("https://xyz.supabase.co/")),
                ("SUPABASE_SERVICE_ROLE_KEY", Some("secret")),
            ],
            || {
                let config = SupabaseConfig::from_env().unwrap();
                assert_eq!(config.url, "https://xyz.supabase.co");
                assert_eq!(config.bucket, "project-preview");
            },
        );
    }

    #[tokio::test]
    async fn in_memory_store_round_trip() {
        let store = InMemoryMediaStore::new();
        let url = store.upload(png_upload(16)).await.unwrap();

        assert!(store.contains(&url).await);
        store.delete(&url).await.unwrap();
        assert_eq!(store.object_count().await, 0);
    }

    #[tokio::test]
    async fn in_memory_store_rejects_invalid_upload() {
        let store = InMemoryMediaStore::new();
        let result = store
            .upload(ImageUpload {
                data: Bytes::from_static(b"plain"),
                content_type: "text/plain".to_string(),
            })
            .await;
        assert!(matches!(result, Err(MediaError::UnsupportedType(_))));
        assert_eq!(store.object_count().await, 0);
    }
}
