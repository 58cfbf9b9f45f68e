/// S3 storage service
use crate::error::SyncError;
use crate::utils::logging::sanitize_s3_key_for_log;
use async_trait::async_trait;

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), SyncError>;
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, SyncError>;
    /// Lists every key under `prefix`, following pagination
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, SyncError>;
}

/// S3 storage service implementation
pub struct S3StorageService {
    client: aws_sdk_s3::Client,
}

impl S3StorageService {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), SyncError> {
        use aws_sdk_s3::primitives::ByteStream;

        let size = data.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(|e| SyncError::Storage(format!("S3 upload failed: {}", e)))?;

        tracing::info!(
            "Uploaded to s3://{}/{} ({} bytes)",
            bucket,
            sanitize_s3_key_for_log(key),
            size
        );
        Ok(())
    }

    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, SyncError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| SyncError::Storage(format!("S3 download failed: {}", e)))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| SyncError::Storage(format!("Failed to read S3 object body: {}", e)))?
            .into_bytes()
            .to_vec();

        tracing::info!(
            "Downloaded from s3://{}/{} ({} bytes)",
            bucket,
            sanitize_s3_key_for_log(key),
            data.len()
        );
        Ok(data)
    }

    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, SyncError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| SyncError::Storage(format!("S3 list failed: {}", e)))?;
            keys.extend(page.contents().iter().filter_map(|o| o.key().map(str::to_string)));
        }

        tracing::debug!("Listed {} keys under s3://{}/{}", keys.len(), bucket, prefix);
        Ok(keys)
    }
}

/// In-memory storage for tests and local runs
#[derive(Default)]
pub struct InMemoryStorageService {
    objects: tokio::sync::Mutex<std::collections::BTreeMap<(String, String), StoredObject>>,
    fail_listing: std::sync::atomic::AtomicBool,
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

impl InMemoryStorageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, bucket: &str, key: &str, data: impl Into<Vec<u8>>) {
        self.objects.lock().await.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data: data.into(),
                content_type: None,
            },
        );
    }

    pub async fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .await
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Makes every subsequent `list_keys` call fail
    pub fn fail_listing(&self) {
        self.fail_listing
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

#[async_trait]
impl StorageService for InMemoryStorageService {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), SyncError> {
        self.objects.lock().await.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, SyncError> {
        self.get(bucket, key)
            .await
            .map(|object| object.data)
            .ok_or_else(|| SyncError::Storage(format!("NoSuchKey: s3://{}/{}", bucket, key)))
    }

    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, SyncError> {
        if self.fail_listing.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SyncError::Storage("S3 list failed: AccessDenied".to_string()));
        }

        Ok(self
            .objects
            .lock()
            .await
            .keys()
            .filter(|(b, k)| b == bucket && k.starts_with(prefix))
            .map(|(_, k)| k.clone())
            .collect())
    }
}
