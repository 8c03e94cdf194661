//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        advertisers::{AdvertisersService, PgAdvertisersService},
        analytics::{AnalyticsService, PgAnalyticsService},
        qr_codes::{PgQrCodesService, QrCodesService},
        scans::{PgScansService, ScansService},
    },
    imaging::QrRenderer,
    storage::ObjectStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub advertisers: Arc<dyn AdvertisersService>,
    pub qr_codes: Arc<dyn QrCodesService>,
    pub scans: Arc<dyn ScansService>,
    pub analytics: Arc<dyn AnalyticsService>,
}

impl AppContext {
    /// Build application context from a database URL and the image collaborators.
    ///
    /// Pending migrations are applied before any service is handed out.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        renderer: Arc<dyn QrRenderer>,
        store: Arc<dyn ObjectStore>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let db = Db::new(pool);

        Ok(Self {
            advertisers: Arc::new(PgAdvertisersService::new(db.clone())),
            qr_codes: Arc::new(PgQrCodesService::new(db.clone(), renderer, store)),
            scans: Arc::new(PgScansService::new(db.clone())),
            analytics: Arc::new(PgAnalyticsService::new(db)),
        })
    }
}
