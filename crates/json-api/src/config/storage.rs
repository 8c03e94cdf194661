//! Storage Config

use beyond_app::storage::ObjectStoreConfig;
use clap::Args;

/// Object store settings for rendered QR images.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Object store base URL
    #[arg(long, env = "OBJECT_STORE_ENDPOINT")]
    pub object_store_endpoint: String,

    /// Bucket QR images are uploaded into
    #[arg(long, env = "OBJECT_STORE_BUCKET")]
    pub object_store_bucket: String,

    /// Public base URL images are served from, defaults to `<endpoint>/<bucket>`
    #[arg(long, env = "OBJECT_STORE_PUBLIC_URL")]
    pub object_store_public_url: Option<String>,

    /// Bearer token sent with uploads
    #[arg(long, env = "OBJECT_STORE_TOKEN", hide_env_values = true)]
    pub object_store_token: Option<String>,
}

impl StorageConfig {
    /// Build the object store client settings.
    #[must_use]
    pub fn object_store_config(&self) -> ObjectStoreConfig {
        let endpoint = self.object_store_endpoint.trim_end_matches('/').to_owned();

        let public_base_url = self.object_store_public_url.clone().unwrap_or_else(|| {
            format!("{endpoint}/{}", self.object_store_bucket)
        });

        ObjectStoreConfig {
            endpoint,
            bucket: self.object_store_bucket.clone(),
            public_base_url,
            token: self.object_store_token.clone(),
        }
    }
}
