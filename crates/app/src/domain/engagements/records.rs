//! Engagement Records

use beyond::engagements::EngagementStatus;
use jiff::Timestamp;

use crate::{domain::qr_codes::records::QrCodeUuid, uuids::TypedUuid};

/// Engagement UUID
pub type EngagementUuid = TypedUuid<EngagementRecord>;

/// Engagement Record
#[derive(Debug, Clone)]
pub struct EngagementRecord {
    pub uuid: EngagementUuid,

    pub qr_code_uuid: QrCodeUuid,

    /// Client-supplied device identifier.
    pub device_id: String,

    pub status: EngagementStatus,

    /// Present only on `redeemed` engagements.
    pub redemption_code: Option<String>,

    /// Why the scan was rejected, for `failed` and `duplicate` engagements.
    pub reason: Option<String>,

    pub ip_address: Option<String>,

    pub user_agent: Option<String>,

    pub magazine_barcode: Option<String>,

    pub driver_id: Option<String>,

    pub scanned_at: Timestamp,
}
