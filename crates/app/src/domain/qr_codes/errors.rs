//! QR codes service errors.

use beyond::qr_codes::QrStatus;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{imaging::RenderError, storage::StorageError};

#[derive(Debug, Error)]
pub enum QrCodesServiceError {
    #[error("a qr code already exists for this campaign")]
    AlreadyExists,

    #[error("qr code not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid data")]
    InvalidData,

    #[error("qr code is already {0}")]
    NotActive(QrStatus),

    #[error("failed to render qr image")]
    Render(#[from] RenderError),

    #[error("failed to upload qr image")]
    Storage(#[from] StorageError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for QrCodesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            QrCodesServiceError::from(Error::RowNotFound),
            QrCodesServiceError::NotFound
        ));
    }

    #[test]
    fn not_active_names_the_status() {
        assert_eq!(
            QrCodesServiceError::NotActive(QrStatus::Expired).to_string(),
            "qr code is already expired"
        );
    }
}
