//! QR Code Data

use jiff::Timestamp;

use crate::domain::qr_codes::records::QrCodeRecord;

/// New campaign QR code as requested by an advertiser.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQrCode {
    pub campaign_id: String,

    pub promo_title: String,

    pub promo_link: String,

    pub promo_description: Option<String>,

    pub promo_terms: Option<String>,

    pub expires_at: Option<Timestamp>,

    /// Redemptions allowed before the code deactivates itself.
    pub max_scans: Option<u64>,
}

/// A freshly generated QR code and the PNG that was uploaded for it.
#[derive(Debug, Clone)]
pub struct GeneratedQrCode {
    pub record: QrCodeRecord,

    pub image_png: Vec<u8>,
}
