//! QR Code Models

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beyond_app::domain::qr_codes::records::QrCodeRecord;

/// QR code details and counters
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QrCodeDetails {
    pub id: Uuid,

    /// Code string encoded in the printed image
    pub qr_code_id: String,

    pub campaign_id: String,

    pub qr_image_url: String,

    pub promo_title: String,

    pub promo_description: Option<String>,

    pub promo_link: String,

    pub promo_terms: Option<String>,

    /// One of `active`, `inactive`, `expired`
    pub status: String,

    pub expires_at: Option<String>,

    pub max_scans: Option<u64>,

    pub scans_count: u64,

    pub unique_scans_count: u64,

    pub redemptions_count: u64,

    pub created_at: String,

    pub updated_at: String,
}

impl From<QrCodeRecord> for QrCodeDetails {
    fn from(record: QrCodeRecord) -> Self {
        QrCodeDetails {
            id: record.uuid.into_uuid(),
            qr_code_id: record.code,
            campaign_id: record.campaign_id,
            qr_image_url: record.image_url,
            promo_title: record.promo_title,
            promo_description: record.promo_description,
            promo_link: record.promo_link,
            promo_terms: record.promo_terms,
            status: record.status.to_string(),
            expires_at: record.expires_at.as_ref().map(ToString::to_string),
            max_scans: record.max_scans,
            scans_count: record.scans_count,
            unique_scans_count: record.unique_scans_count,
            redemptions_count: record.redemptions_count,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QrCodeResponse {
    pub success: bool,

    pub qr_code: QrCodeDetails,
}

impl From<QrCodeRecord> for QrCodeResponse {
    fn from(record: QrCodeRecord) -> Self {
        QrCodeResponse {
            success: true,
            qr_code: record.into(),
        }
    }
}
