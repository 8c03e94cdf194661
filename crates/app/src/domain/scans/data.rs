//! Scan Data

use crate::domain::{
    engagements::{data::ScanOrigin, records::EngagementRecord},
    qr_codes::records::QrCodeRecord,
};

/// A rider's scan of a printed QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Code string decoded from the image.
    pub qr_code: String,

    pub device_id: String,

    pub origin: ScanOrigin,
}

/// Outcome of a successful scan.
#[derive(Debug, Clone)]
pub struct Redemption {
    /// QR code with its counters after the redemption.
    pub qr_code: QrCodeRecord,

    /// The `redeemed` engagement carrying the redemption code.
    pub engagement: EngagementRecord,
}
