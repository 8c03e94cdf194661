//! Get QR Code Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    qr_codes::{errors::into_api_error, models::QrCodeResponse},
    state::State,
};

/// Get QR Code Handler
///
/// Returns one of the advertiser's QR codes with its counters.
#[endpoint(
    tags("qr-codes"),
    summary = "Get QR Code",
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
        .get_qr_code(advertiser, uuid.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(qr_code.into()))
}
