//! Object storage for rendered QR images.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod http;

pub use http::{HttpObjectStore, ObjectStoreConfig};

/// Errors that can occur when writing to the object store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-2xx response.
    #[error("unexpected response from object store: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
/// Durable, publicly readable blob storage.
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key` and return the public URL it can be fetched from.
    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<String, StorageError>;

    /// Remove the object stored under `key`. Removing a missing object succeeds.
    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;
}
