//! Advertiser Data

use uuid::Uuid;

use crate::domain::advertisers::records::AdvertiserUuid;

/// New Advertiser Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdvertiser {
    /// UUID to assign to the advertiser row.
    pub uuid: AdvertiserUuid,

    /// Advertiser name to persist.
    pub name: String,

    /// UUID of the initial API token.
    pub token_uuid: Uuid,

    /// SHA-256 hex digest of the initial raw API token.
    pub token_hash: String,
}
