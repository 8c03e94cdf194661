//! Depot helper extensions.

use std::any::Any;

use beyond_app::domain::advertisers::records::AdvertiserUuid;
use salvo::prelude::Depot;

use crate::errors::ApiError;

const ADVERTISER_UUID_DEPOT_KEY: &str = "advertiser_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// Record the advertiser an authenticated request acts for.
    fn insert_advertiser_uuid(&mut self, advertiser: AdvertiserUuid);

    fn advertiser_uuid_or_401(&self) -> Result<AdvertiserUuid, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>()
            .map_err(|_ignored| ApiError::internal("application state unavailable"))
    }

    fn insert_advertiser_uuid(&mut self, advertiser: AdvertiserUuid) {
        self.insert(ADVERTISER_UUID_DEPOT_KEY, advertiser);
    }

    fn advertiser_uuid_or_401(&self) -> Result<AdvertiserUuid, ApiError> {
        self.get::<AdvertiserUuid>(ADVERTISER_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| ApiError::unauthorized("authentication required"))
    }
}
