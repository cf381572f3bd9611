use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::BillError;

/// Object storage the rendered document is uploaded to.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BillError>;

    /// A time-limited GET URL for an object.
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, BillError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-process store for tests and local runs.
///
/// Links use a `memory://bucket/key` scheme. Failures can be injected to
/// exercise error paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    objects: Arc<RwLock<HashMap<(String, String), StoredObject>>>,
    fail_put: Option<String>,
    fail_presign: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `put` fails with `message`.
    pub fn failing_put(message: impl Into<String>) -> Self {
        Self {
            fail_put: Some(message.into()),
            ..Self::default()
        }
    }

    /// Uploads succeed but presigning fails with `message`.
    pub fn failing_presign(message: impl Into<String>) -> Self {
        Self {
            fail_presign: Some(message.into()),
            ..Self::default()
        }
    }

    pub async fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        let objects = self.objects.read().await;
        objects.get(&(bucket.to_string(), key.to_string())).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BillError> {
        if let Some(message) = &self.fail_put {
            return Err(BillError::Storage(message.clone()));
        }
        let mut objects = self.objects.write().await;
        objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, BillError> {
        if let Some(message) = &self.fail_presign {
            return Err(BillError::Storage(message.clone()));
        }
        if self.get(bucket, key).await.is_none() {
            return Err(BillError::Storage(format!("no such object: {bucket}/{key}")));
        }
        Ok(format!(
            "memory://{bucket}/{key}?expires={}",
            expires_in.as_secs()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_presign() {
        let store = MemoryStore::new();
        store
            .put("swiss-qr-code", "qr-bill.pdf", b"%PDF-".to_vec(), "application/pdf")
            .await
            .unwrap();
        let url = store
            .presign_get("swiss-qr-code", "qr-bill.pdf", Duration::from_secs(300))
            .await
            .unwrap();
        assert_eq!(url, "memory://swiss-qr-code/qr-bill.pdf?expires=300");

        let object = store.get("swiss-qr-code", "qr-bill.pdf").await.unwrap();
        assert_eq!(object.content_type, "application/pdf");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn overwrites_same_key() {
        let store = MemoryStore::new();
        for body in [b"one".to_vec(), b"two".to_vec()] {
            store.put("b", "k", body, "application/pdf").await.unwrap();
        }
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("b", "k").await.unwrap().bytes, b"two");
    }

    #[tokio::test]
    async fn presign_missing_object() {
        let store = MemoryStore::new();
        let err = store
            .presign_get("b", "missing.pdf", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, BillError::Storage(_)));
    }

    #[tokio::test]
    async fn injected_failures() {
        let store = MemoryStore::failing_put("bucket unavailable");
        let err = store.put("b", "k", vec![], "application/pdf").await.unwrap_err();
        assert_eq!(err.to_string(), "bucket unavailable");
        assert!(store.is_empty().await);
    }
}
