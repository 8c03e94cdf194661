//! Scan Errors

use beyond::{engagements::EngagementStatus, qr_codes::QrStatus};
use tracing::error;

use beyond_app::domain::scans::{ScansServiceError, errors::DUPLICATE_REASON};

use crate::{errors::ApiError, observability::ScanOutcome};

pub(crate) fn scan_outcome(error: &ScansServiceError) -> ScanOutcome {
    match error {
        ScansServiceError::MissingField(_) => ScanOutcome::Invalid,
        ScansServiceError::NotFound => ScanOutcome::NotFound,
        ScansServiceError::Duplicate => ScanOutcome::Duplicate,
        ScansServiceError::Sql(_) => ScanOutcome::Error,
        ScansServiceError::Ineligible(_)
        | ScansServiceError::Expired
        | ScansServiceError::Exhausted => match error.qr_status() {
            Some(QrStatus::Expired) => ScanOutcome::Expired,
            Some(QrStatus::Active | QrStatus::Inactive) | None => ScanOutcome::Inactive,
        },
    }
}

pub(crate) fn into_api_error(error: ScansServiceError) -> ApiError {
    match error {
        ScansServiceError::MissingField(_) => ApiError::bad_request(error.to_string()),
        ScansServiceError::NotFound => ApiError::not_found(error.to_string()),
        ScansServiceError::Ineligible(_)
        | ScansServiceError::Expired
        | ScansServiceError::Exhausted => {
            let api_error = ApiError::bad_request(error.to_string());

            match error.qr_status() {
                Some(status) => api_error.with_status(status.as_str()),
                None => api_error,
            }
        }
        ScansServiceError::Duplicate => ApiError::conflict(error.to_string())
            .with_status(EngagementStatus::Duplicate.as_str())
            .with_reason(DUPLICATE_REASON),
        ScansServiceError::Sql(ref source) => {
            error!("failed to process scan: {source}");

            ApiError::internal(error.to_string())
        }
    }
}
