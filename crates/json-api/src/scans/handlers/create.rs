//! Scan QR Code Handler
//!
//! Public endpoint hit by the rider's phone after scanning a printed code.

use std::{string::ToString, sync::Arc};

use salvo::{
    http::header::USER_AGENT,
    oapi::ToSchema,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beyond_app::domain::{
    engagements::data::ScanOrigin,
    scans::data::{Redemption, ScanRequest},
};

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{ScanOutcome, observe_scan_outcome},
    scans::errors::{into_api_error, scan_outcome},
    state::State,
};

/// Scan QR Code Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScanQrCodeRequest {
    /// Code string decoded from the image
    #[serde(default)]
    pub qr_code: Option<String>,

    /// Stable identifier of the scanning device
    #[serde(default)]
    pub device_id: Option<String>,

    /// Defaults to the connection's remote address
    pub ip_address: Option<String>,

    /// Defaults to the `User-Agent` header
    pub user_agent: Option<String>,

    pub magazine_barcode: Option<String>,

    pub driver_id: Option<String>,
}

/// Offer unlocked by a scan
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OfferResponse {
    pub title: String,

    pub description: Option<String>,

    /// Code the rider shows to claim the offer
    pub redemption_code: String,

    pub promo_link: String,

    pub terms: Option<String>,

    pub expires_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EngagementResponse {
    pub id: Uuid,

    pub scanned_at: String,

    pub status: String,
}

/// Scan Redeemed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScanRedeemedResponse {
    pub success: bool,

    pub offer: OfferResponse,

    pub engagement: EngagementResponse,
}

impl TryFrom<Redemption> for ScanRedeemedResponse {
    type Error = ApiError;

    fn try_from(Redemption { qr_code, engagement }: Redemption) -> Result<Self, Self::Error> {
        let redemption_code = engagement
            .redemption_code
            .ok_or_else(|| ApiError::internal("redemption issued without a code"))?;

        Ok(ScanRedeemedResponse {
            success: true,
            offer: OfferResponse {
                title: qr_code.promo_title,
                description: qr_code.promo_description,
                redemption_code,
                promo_link: qr_code.promo_link,
                terms: qr_code.promo_terms,
                expires_at: qr_code.expires_at.as_ref().map(ToString::to_string),
            },
            engagement: EngagementResponse {
                id: engagement.uuid.into_uuid(),
                scanned_at: engagement.scanned_at.to_string(),
                status: engagement.status.to_string(),
            },
        })
    }
}

fn remote_ip(req: &Request) -> Option<String> {
    let addr = req.remote_addr();

    addr.as_ipv4()
        .map(|addr| addr.ip().to_string())
        .or_else(|| addr.as_ipv6().map(|addr| addr.ip().to_string()))
}

/// Scan QR Code Handler
///
/// Validates a scan against the code's state and the device's history, and issues a
/// redemption code when the offer can be claimed.
#[endpoint(tags("scans"), summary = "Scan QR Code", request_body = ScanQrCodeRequest)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ScanRedeemedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body: ScanQrCodeRequest = json_body(req).await?;

    let origin = ScanOrigin {
        ip_address: body.ip_address.or_else(|| remote_ip(req)),
        user_agent: body.user_agent.or_else(|| req.header::<String>(USER_AGENT)),
        magazine_barcode: body.magazine_barcode,
        driver_id: body.driver_id,
    };

    let redemption = state
        .app
        .scans
        .scan(ScanRequest {
            qr_code: body.qr_code.unwrap_or_default(),
            device_id: body.device_id.unwrap_or_default(),
            origin,
        })
        .await
        .map_err(|error| {
            observe_scan_outcome(scan_outcome(&error));

            into_api_error(error)
        })?;

    observe_scan_outcome(ScanOutcome::Redeemed);

    let response = ScanRedeemedResponse::try_from(redemption)?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use beyond::{engagements::EngagementStatus, qr_codes::QrStatus};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use beyond_app::domain::scans::{MockScansService, ScansServiceError};

    use crate::{
        errors::ErrorBody,
        test_helpers::{make_engagement, make_qr_code, scans_service},
    };

    use super::*;

    fn make_service(scans: MockScansService) -> Service {
        scans_service(scans, Router::with_path("scan").post(handler))
    }

    #[tokio::test]
    async fn test_scan_returns_offer_and_redemption_code() -> TestResult {
        let mut qr_code = make_qr_code("camp-1");

        qr_code.scans_count = 1;
        qr_code.redemptions_count = 1;
        qr_code.unique_scans_count = 1;

        let engagement = make_engagement(&qr_code, "dev-A", EngagementStatus::Redeemed);
        let engagement_uuid = engagement.uuid;

        let mut scans = MockScansService::new();

        scans
            .expect_scan()
            .once()
            .withf(|request| {
                request.qr_code == "BT-7K2M9QX4HD1A"
                    && request.device_id == "dev-A"
                    && request.origin.magazine_barcode.as_deref() == Some("MAG-0042")
                    && request.origin.user_agent.as_deref() == Some("BeyondRider/1.0")
            })
            .return_once(move |_| {
                Ok(Redemption {
                    qr_code,
                    engagement,
                })
            });

        let mut res = TestClient::post("http://example.com/scan")
            .add_header(USER_AGENT, "BeyondRider/1.0", true)
            .json(&json!({
                "qrCode": "BT-7K2M9QX4HD1A",
                "deviceId": "dev-A",
                "magazineBarcode": "MAG-0042"
            }))
            .send(&make_service(scans))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ScanRedeemedResponse = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.offer.title, "20% Off");
        assert_eq!(body.offer.redemption_code, "Q7Z2K9M4X1B8");
        assert_eq!(body.offer.terms.as_deref(), Some("One per customer"));
        assert_eq!(body.engagement.id, engagement_uuid.into_uuid());
        assert_eq!(body.engagement.status, "redeemed");

        Ok(())
    }

    #[tokio::test]
    async fn test_scan_prefers_client_supplied_origin() -> TestResult {
        let qr_code = make_qr_code("camp-1");
        let engagement = make_engagement(&qr_code, "dev-A", EngagementStatus::Redeemed);

        let mut scans = MockScansService::new();

        scans
            .expect_scan()
            .once()
            .withf(|request| {
                request.origin.ip_address.as_deref() == Some("203.0.113.7")
                    && request.origin.user_agent.as_deref() == Some("Kiosk/2.0")
            })
            .return_once(move |_| {
                Ok(Redemption {
                    qr_code,
                    engagement,
                })
            });

        let res = TestClient::post("http://example.com/scan")
            .add_header(USER_AGENT, "BeyondRider/1.0", true)
            .json(&json!({
                "qrCode": "BT-7K2M9QX4HD1A",
                "deviceId": "dev-A",
                "ipAddress": "203.0.113.7",
                "userAgent": "Kiosk/2.0"
            }))
            .send(&make_service(scans))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_scan_returns_409_with_reason() -> TestResult {
        let mut scans = MockScansService::new();

        scans
            .expect_scan()
            .once()
            .return_once(|_| Err(ScansServiceError::Duplicate));

        let mut res = TestClient::post("http://example.com/scan")
            .json(&json!({ "qrCode": "BT-7K2M9QX4HD1A", "deviceId": "dev-A" }))
            .send(&make_service(scans))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.status.as_deref(), Some("duplicate"));
        assert_eq!(
            body.reason.as_deref(),
            Some("offer already claimed on this device")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_exhausted_code_returns_400_with_inactive_status() -> TestResult {
        let mut scans = MockScansService::new();

        scans
            .expect_scan()
            .once()
            .return_once(|_| Err(ScansServiceError::Exhausted));

        let mut res = TestClient::post("http://example.com/scan")
            .json(&json!({ "qrCode": "BT-7K2M9QX4HD1A", "deviceId": "dev-B" }))
            .send(&make_service(scans))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.status.as_deref(), Some("inactive"));
        assert_eq!(body.reason, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_code_returns_400_with_expired_status() -> TestResult {
        let mut scans = MockScansService::new();

        scans
            .expect_scan()
            .once()
            .return_once(|_| Err(ScansServiceError::Ineligible(QrStatus::Expired)));

        let mut res = TestClient::post("http://example.com/scan")
            .json(&json!({ "qrCode": "BT-7K2M9QX4HD1A", "deviceId": "dev-C" }))
            .send(&make_service(scans))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.status.as_deref(), Some("expired"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_code_returns_404() -> TestResult {
        let mut scans = MockScansService::new();

        scans
            .expect_scan()
            .once()
            .return_once(|_| Err(ScansServiceError::NotFound));

        let res = TestClient::post("http://example.com/scan")
            .json(&json!({ "qrCode": "BT-NOPE", "deviceId": "dev-A" }))
            .send(&make_service(scans))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_device_returns_400() -> TestResult {
        let mut scans = MockScansService::new();

        scans
            .expect_scan()
            .once()
            .withf(|request| request.device_id.is_empty())
            .return_once(|_| Err(ScansServiceError::MissingField("deviceId")));

        let mut res = TestClient::post("http://example.com/scan")
            .json(&json!({ "qrCode": "BT-7K2M9QX4HD1A" }))
            .send(&make_service(scans))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.error, "missing required field: deviceId");

        Ok(())
    }

    #[tokio::test]
    async fn test_null_qr_code_returns_400_json() -> TestResult {
        let mut scans = MockScansService::new();

        scans
            .expect_scan()
            .once()
            .withf(|request| request.qr_code.is_empty() && request.device_id == "dev-A")
            .return_once(|_| Err(ScansServiceError::MissingField("qrCode")));

        let mut res = TestClient::post("http://example.com/scan")
            .json(&json!({ "qrCode": null, "deviceId": "dev-A" }))
            .send(&make_service(scans))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.error, "missing required field: qrCode");

        Ok(())
    }

    #[tokio::test]
    async fn test_mistyped_qr_code_returns_400_json() -> TestResult {
        let mut scans = MockScansService::new();

        scans.expect_scan().never();

        let mut res = TestClient::post("http://example.com/scan")
            .json(&json!({ "qrCode": 5, "deviceId": "dev-A" }))
            .send(&make_service(scans))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.error, "request body must be a valid JSON object");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_json_body_returns_400_json() -> TestResult {
        let mut scans = MockScansService::new();

        scans.expect_scan().never();

        let mut res = TestClient::post("http://example.com/scan")
            .raw_json("not json")
            .send(&make_service(scans))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.status, None);
        assert_eq!(body.error, "request body must be a valid JSON object");

        Ok(())
    }
}
