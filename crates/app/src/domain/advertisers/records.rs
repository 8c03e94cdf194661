//! Advertiser Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Advertiser UUID
pub type AdvertiserUuid = TypedUuid<AdvertiserRecord>;

/// Advertiser Record
#[derive(Debug, Clone)]
pub struct AdvertiserRecord {
    /// Unique advertiser identifier.
    pub uuid: AdvertiserUuid,

    /// Display name.
    pub name: String,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,

    /// Soft-delete timestamp; deleted advertisers can no longer authenticate.
    pub deleted_at: Option<Timestamp>,
}
