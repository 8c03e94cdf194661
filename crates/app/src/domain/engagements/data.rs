//! Engagement Data

use beyond::engagements::EngagementStatus;

use crate::domain::{engagements::records::EngagementUuid, qr_codes::records::QrCodeUuid};

/// Where a scan came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOrigin {
    pub ip_address: Option<String>,

    pub user_agent: Option<String>,

    /// Barcode of the magazine the QR code was printed in.
    pub magazine_barcode: Option<String>,

    /// Driver who distributed the magazine.
    pub driver_id: Option<String>,
}

/// New Engagement Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEngagement {
    pub uuid: EngagementUuid,

    pub qr_code_uuid: QrCodeUuid,

    pub device_id: String,

    pub status: EngagementStatus,

    pub redemption_code: Option<String>,

    pub reason: Option<String>,

    pub origin: ScanOrigin,
}
