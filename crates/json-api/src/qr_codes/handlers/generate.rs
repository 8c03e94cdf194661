//! Generate QR Code Handler

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::ToSchema,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beyond_app::domain::qr_codes::data::{GeneratedQrCode, NewQrCode};

use crate::{errors::ApiError, extensions::*, qr_codes::errors::into_api_error, state::State};

/// Generate QR Code Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateQrCodeRequest {
    /// Campaign reference, unique per advertiser
    #[serde(default)]
    pub campaign_id: Option<String>,

    #[serde(default)]
    pub promo_title: Option<String>,

    #[serde(default)]
    pub promo_link: Option<String>,

    pub promo_description: Option<String>,

    pub promo_terms: Option<String>,

    /// RFC 3339 timestamp from which scans are rejected
    pub expires_at: Option<String>,

    /// Redemptions allowed before the code deactivates itself
    pub max_scans: Option<u64>,
}

impl TryFrom<GenerateQrCodeRequest> for NewQrCode {
    type Error = ApiError;

    fn try_from(request: GenerateQrCodeRequest) -> Result<Self, Self::Error> {
        let expires_at = request
            .expires_at
            .as_deref()
            .map(str::parse::<Timestamp>)
            .transpose()
            .map_err(|_ignored| ApiError::bad_request("expiresAt must be an RFC 3339 timestamp"))?;

        Ok(NewQrCode {
            campaign_id: request.campaign_id.unwrap_or_default(),
            promo_title: request.promo_title.unwrap_or_default(),
            promo_link: request.promo_link.unwrap_or_default(),
            promo_description: request.promo_description,
            promo_terms: request.promo_terms,
            expires_at,
            max_scans: request.max_scans,
        })
    }
}

/// Newly generated QR code
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeneratedQrCodeDetails {
    pub id: Uuid,

    /// Code string encoded in the image
    pub qr_code_id: String,

    pub qr_image_url: String,

    /// `data:image/png;base64,` URL of the uploaded image
    pub qr_image_data: String,

    pub promo_title: String,

    pub promo_link: String,

    pub status: String,
}

/// QR Code Generated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QrCodeGeneratedResponse {
    pub success: bool,

    pub qr_code: GeneratedQrCodeDetails,
}

impl From<GeneratedQrCode> for QrCodeGeneratedResponse {
    fn from(GeneratedQrCode { record, image_png }: GeneratedQrCode) -> Self {
        QrCodeGeneratedResponse {
            success: true,
            qr_code: GeneratedQrCodeDetails {
                id: record.uuid.into_uuid(),
                qr_code_id: record.code,
                qr_image_url: record.image_url,
                qr_image_data: format!("data:image/png;base64,{}", STANDARD.encode(image_png)),
                promo_title: record.promo_title,
                promo_link: record.promo_link,
                status: record.status.to_string(),
            },
        }
    }
}

/// Generate QR Code Handler
///
/// Renders a campaign QR code, uploads the image and stores the code as `active`.
#[endpoint(
    tags("qr-codes"),
    summary = "Generate Campaign QR Code",
    request_body = GenerateQrCodeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "QR code generated"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<QrCodeGeneratedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let advertiser = depot.advertiser_uuid_or_401()?;

    let request: GenerateQrCodeRequest = json_body(req).await?;
    let qr_code = NewQrCode::try_from(request)?;

    let generated = state
        .app
        .qr_codes
        .generate_qr_code(advertiser, qr_code)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/qr-codes/{}", generated.record.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(generated.into()))
}
