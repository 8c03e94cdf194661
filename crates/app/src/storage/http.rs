//! HTTP object store client.
//!
//! Writes objects with a plain `PUT {endpoint}/{bucket}/{key}`, which S3-compatible
//! gateways and most CDN storage zones accept.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};

use super::{ObjectStore, StorageError};

/// Configuration for connecting to an object store.
#[derive(Debug, Clone)]
pub struct ObjectStoreConfig {
    /// Store write endpoint, e.g. `"https://storage.example.com"`.
    pub endpoint: String,

    /// Bucket objects are written into.
    pub bucket: String,

    /// Base URL objects are publicly served from.
    pub public_base_url: String,

    /// Optional bearer token sent with writes.
    pub token: Option<String>,
}

/// HTTP client for an object store.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    config: ObjectStoreConfig,
    http: Client,
}

impl HttpObjectStore {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ObjectStoreConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.bucket,
            key.trim_start_matches('/')
        )
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<String, StorageError> {
        let mut request = self
            .http
            .put(self.object_url(key))
            .header(CONTENT_TYPE, content_type)
            .body(body);

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(StorageError::UnexpectedResponse(format!(
                "put {key} failed with status {status}: {text}"
            )));
        }

        Ok(self.public_url(key))
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        let mut request = self.http.delete(self.object_url(key));

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() && status != StatusCode::NOT_FOUND {
            let text = response.text().await.unwrap_or_default();

            return Err(StorageError::UnexpectedResponse(format!(
                "delete {key} failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}
