//! Deactivate QR Code Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    qr_codes::{errors::into_api_error, models::QrCodeResponse},
    state::State,
};

/// Deactivate QR Code Handler
///
/// Moves an `active` QR code to `inactive`; later scans are rejected.
#[endpoint(
    tags("qr-codes"),
    summary = "Deactivate QR Code",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<QrCodeResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let advertiser = depot.advertiser_uuid_or_401()?;

    let qr_code = state
        .app
        .qr_codes
        .deactivate_qr_code(advertiser, uuid.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(qr_code.into()))
}

#[cfg(test)]
mod tests {
    use beyond::qr_codes::QrStatus;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use beyond_app::domain::qr_codes::{
        MockQrCodesService, QrCodesServiceError, records::QrCodeUuid,
    };

    use crate::{
        errors::ErrorBody,
        test_helpers::{TEST_ADVERTISER_UUID, make_qr_code, qr_codes_service},
    };

    use super::*;

    fn make_service(qr_codes: MockQrCodesService) -> Service {
        qr_codes_service(
            qr_codes,
            Router::with_path("qr-codes/{uuid}/deactivate").post(handler),
        )
    }

    #[tokio::test]
    async fn test_deactivate_qr_code_returns_inactive_code() -> TestResult {
        let mut record = make_qr_code("camp-1");

        record.status = QrStatus::Inactive;

        let uuid = record.uuid;

        let mut qr_codes = MockQrCodesService::new();

        qr_codes
            .expect_deactivate_qr_code()
            .once()
            .withf(move |advertiser, qr_code| {
                *advertiser == TEST_ADVERTISER_UUID && *qr_code == uuid
            })
            .return_once(move |_, _| Ok(record));

        let mut res = TestClient::post(format!("http://example.com/qr-codes/{uuid}/deactivate"))
            .send(&make_service(qr_codes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: QrCodeResponse = res.take_json().await?;

        assert_eq!(body.qr_code.status, "inactive");

        Ok(())
    }

    #[tokio::test]
    async fn test_deactivate_expired_qr_code_returns_409() -> TestResult {
        let uuid = QrCodeUuid::new();

        let mut qr_codes = MockQrCodesService::new();

        qr_codes
            .expect_deactivate_qr_code()
            .once()
            .return_once(|_, _| Err(QrCodesServiceError::NotActive(QrStatus::Expired)));

        let mut res = TestClient::post(format!("http://example.com/qr-codes/{uuid}/deactivate"))
            .send(&make_service(qr_codes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.error, "qr code is already expired");
        assert_eq!(body.status.as_deref(), Some("expired"));

        Ok(())
    }

    #[tokio::test]
    async fn test_deactivate_unknown_qr_code_returns_404() -> TestResult {
        let uuid = QrCodeUuid::new();

        let mut qr_codes = MockQrCodesService::new();

        qr_codes
            .expect_deactivate_qr_code()
            .once()
            .return_once(|_, _| Err(QrCodesServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/qr-codes/{uuid}/deactivate"))
            .send(&make_service(qr_codes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
