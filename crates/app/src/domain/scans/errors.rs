//! Scans service errors.

use beyond::qr_codes::QrStatus;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Reason recorded on, and returned for, a repeat claim by the same device.
pub const DUPLICATE_REASON: &str = "offer already claimed on this device";

#[derive(Debug, Error)]
pub enum ScansServiceError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("qr code not found")]
    NotFound,

    #[error("qr code is {0}")]
    Ineligible(QrStatus),

    #[error("qr code has expired")]
    Expired,

    #[error("qr code has reached its maximum number of scans")]
    Exhausted,

    #[error("offer already claimed")]
    Duplicate,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl ScansServiceError {
    /// Status of the QR code a rejection refers to, if the rejection is about its state.
    pub const fn qr_status(&self) -> Option<QrStatus> {
        match self {
            Self::Ineligible(status) => Some(*status),
            Self::Expired => Some(QrStatus::Expired),
            Self::Exhausted => Some(QrStatus::Inactive),
            Self::MissingField(_) | Self::NotFound | Self::Duplicate | Self::Sql(_) => None,
        }
    }
}

impl From<Error> for ScansServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // Only the single-claim index can be violated by a scan.
            Some(ErrorKind::UniqueViolation) => Self::Duplicate,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
