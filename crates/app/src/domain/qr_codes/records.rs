//! QR Code Records

use beyond::qr_codes::{QrState, QrStatus};
use jiff::Timestamp;

use crate::{domain::advertisers::records::AdvertiserUuid, uuids::TypedUuid};

/// QR Code UUID
pub type QrCodeUuid = TypedUuid<QrCodeRecord>;

/// QR Code Record
///
/// One row per advertiser campaign. Counters only move forward; `status` only
/// leaves `active`, never returns to it.
#[derive(Debug, Clone)]
pub struct QrCodeRecord {
    pub uuid: QrCodeUuid,

    /// Owning advertiser.
    pub advertiser_uuid: AdvertiserUuid,

    /// Advertiser-chosen campaign reference.
    pub campaign_id: String,

    /// Code string encoded in the printed image.
    pub code: String,

    pub promo_title: String,

    pub promo_description: Option<String>,

    pub promo_link: String,

    pub promo_terms: Option<String>,

    /// Public URL of the rendered PNG.
    pub image_url: String,

    pub status: QrStatus,

    pub expires_at: Option<Timestamp>,

    pub max_scans: Option<u64>,

    /// Redeeming scans so far.
    pub scans_count: u64,

    /// Devices whose first engagement was a redeeming scan.
    pub unique_scans_count: u64,

    pub redemptions_count: u64,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl QrCodeRecord {
    /// Snapshot of the fields the scan state machine looks at.
    #[must_use]
    pub fn state(&self) -> QrState {
        QrState {
            status: self.status,
            expires_at: self.expires_at,
            max_scans: self.max_scans,
            scans_count: self.scans_count,
        }
    }
}
