//! QR Code Errors

use tracing::error;

use beyond_app::domain::qr_codes::QrCodesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: QrCodesServiceError) -> ApiError {
    match error {
        QrCodesServiceError::AlreadyExists => ApiError::conflict(error.to_string()),
        QrCodesServiceError::NotFound => ApiError::not_found(error.to_string()),
        QrCodesServiceError::InvalidReference
        | QrCodesServiceError::MissingField(_)
        | QrCodesServiceError::InvalidData => ApiError::bad_request(error.to_string()),
        QrCodesServiceError::NotActive(status) => {
            ApiError::conflict(error.to_string()).with_status(status.as_str())
        }
        QrCodesServiceError::Render(ref source) => {
            error!("failed to render qr image: {source}");

            ApiError::internal(error.to_string())
        }
        QrCodesServiceError::Storage(ref source) => {
            error!("failed to upload qr image: {source}");

            ApiError::internal(error.to_string())
        }
        QrCodesServiceError::Sql(ref source) => {
            error!("qr code query failed: {source}");

            ApiError::internal(error.to_string())
        }
    }
}
