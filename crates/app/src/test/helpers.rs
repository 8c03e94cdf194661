//! Test Helpers

use beyond::engagements::EngagementStatus;
use sqlx::query_scalar;
use testresult::TestResult;

use crate::{
    domain::{
        engagements::data::ScanOrigin,
        qr_codes::{data::NewQrCode, records::QrCodeUuid},
        scans::data::ScanRequest,
    },
    test::TestContext,
};

pub(crate) fn new_qr_code(campaign_id: &str) -> NewQrCode {
    NewQrCode {
        campaign_id: campaign_id.to_string(),
        promo_title: "Free Flat White".to_string(),
        promo_link: "https://coastal.example.com/offer".to_string(),
        promo_description: Some("One free flat white with any pastry".to_string()),
        promo_terms: Some("One per customer".to_string()),
        expires_at: None,
        max_scans: None,
    }
}

pub(crate) fn scan_request(qr_code: &str, device_id: &str) -> ScanRequest {
    ScanRequest {
        qr_code: qr_code.to_string(),
        device_id: device_id.to_string(),
        origin: ScanOrigin::default(),
    }
}

/// Statuses of a QR code's engagements, oldest first.
pub(crate) async fn engagement_statuses(
    ctx: &TestContext,
    qr_code: QrCodeUuid,
) -> TestResult<Vec<EngagementStatus>> {
    let statuses: Vec<String> = query_scalar(
        "SELECT status FROM engagements WHERE qr_code_uuid = $1 ORDER BY scanned_at, uuid",
    )
    .bind(qr_code.into_uuid())
    .fetch_all(ctx.db.pool())
    .await?;

    let mut parsed = Vec::with_capacity(statuses.len());

    for status in statuses {
        parsed.push(status.parse::<EngagementStatus>()?);
    }

    Ok(parsed)
}
