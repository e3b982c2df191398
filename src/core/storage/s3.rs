//! Amazon S3 artifact store backed by `object_store`.
//!
//! `object_store` binds one client to one bucket, so stores are built lazily
//! per bucket and cached for the lifetime of the run.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::{ObjectStore, PutPayload, path::Path as ObjectPath};
use parking_lot::Mutex;
use tracing::{debug, error, info};
use zeroize::Zeroize;

use super::base::ArtifactStore;
use crate::errors::{PipelineError, PipelineResult};

/// Connection settings shared by every bucket the store talks to.
#[derive(Clone, Default)]
pub struct S3StoreSettings {
    pub region: String,
    /// Custom endpoint (S3-compatible services, local testing)
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for S3StoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3StoreSettings")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("has_explicit_credentials", &self.has_explicit_credentials())
            .finish()
    }
}

impl Drop for S3StoreSettings {
    fn drop(&mut self) {
        if let Some(ref mut key) = self.access_key_id {
            key.zeroize();
        }
        if let Some(ref mut secret) = self.secret_access_key {
            secret.zeroize();
        }
        if let Some(ref mut token) = self.session_token {
            token.zeroize();
        }
    }
}

impl S3StoreSettings {
    /// Check if explicit AWS credentials are provided.
    pub fn has_explicit_credentials(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }
}

/// S3 implementation of [`ArtifactStore`].
pub struct S3ArtifactStore {
    settings: S3StoreSettings,
    stores: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl S3ArtifactStore {
    pub fn new(settings: S3StoreSettings) -> Self {
        Self {
            settings,
            stores: Mutex::new(HashMap::new()),
        }
    }

    fn store_for(&self, bucket: &str) -> PipelineResult<Arc<dyn ObjectStore>> {
        let mut stores = self.stores.lock();
        if let Some(store) = stores.get(bucket) {
            return Ok(store.clone());
        }

        // Environment first so explicit settings win
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_region(&self.settings.region);

        if let Some(ref endpoint) = self.settings.endpoint {
            builder = builder.with_endpoint(endpoint);
            if endpoint.starts_with("http://") {
                builder = builder.with_allow_http(true);
            }
        }

        if let (Some(key), Some(secret)) = (
            self.settings.access_key_id.as_ref(),
            self.settings.secret_access_key.as_ref(),
        ) {
            builder = builder
                .with_access_key_id(key)
                .with_secret_access_key(secret);
            if let Some(ref token) = self.settings.session_token {
                builder = builder.with_token(token);
            }
        }

        let store = builder.build().map_err(|e| {
            error!("Failed to create S3 client for bucket={}: {}", bucket, e);
            PipelineError::Storage(format!("Failed to create S3 client for {}: {}", bucket, e))
        })?;

        info!(
            "Created S3 client for bucket={} region={}",
            bucket, self.settings.region
        );

        let store: Arc<dyn ObjectStore> = Arc::new(store);
        stores.insert(bucket.to_string(), store.clone());
        Ok(store)
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn put(&self, bucket: &str, key: &str, content: Bytes) -> PipelineResult<()> {
        let store = self.store_for(bucket)?;

        let object_path = ObjectPath::parse(key).map_err(|e| {
            PipelineError::Storage(format!("Invalid object key {}: {}", key, e))
        })?;

        let size = content.len();
        debug!(
            "Uploading object to bucket={} with key={} ({} bytes)",
            bucket, key, size
        );

        store
            .put(&object_path, PutPayload::from(content))
            .await
            .map_err(|e| {
                error!("Failed to upload {} to bucket={}: {:?}", key, bucket, e);
                PipelineError::Storage(format!("Failed to upload {} to {}: {}", key, bucket, e))
            })?;

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "s3"
    }
}
