//! API error responses.
//!
//! Every failure is rendered as `{"error": ..., "status"?: ..., "reason"?: ...}` with the
//! matching HTTP status code.

use salvo::{
    http::StatusCode,
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::{Json, Response},
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    /// Human readable message
    pub error: String,

    /// QR code status the failure refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Why the request was rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Error)]
#[error("{}", .body.error)]
pub(crate) struct ApiError {
    status_code: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub(crate) fn new(status_code: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status_code,
            body: ErrorBody {
                error: error.into(),
                status: None,
                reason: None,
            },
        }
    }

    pub(crate) fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub(crate) fn unauthorized(error: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error)
    }

    pub(crate) fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    pub(crate) fn conflict(error: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, error)
    }

    pub(crate) fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    #[must_use]
    pub(crate) fn with_status(mut self, status: impl Into<String>) -> Self {
        self.body.status = Some(status.into());
        self
    }

    #[must_use]
    pub(crate) fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.body.reason = Some(reason.into());
        self
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status_code);
        res.render(Json(self.body));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status_code, description) in [
            (StatusCode::BAD_REQUEST, "Bad request"),
            (StatusCode::UNAUTHORIZED, "Unauthorized"),
            (StatusCode::NOT_FOUND, "Not found"),
            (StatusCode::CONFLICT, "Conflict"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        ] {
            operation.responses.insert(
                status_code.as_str(),
                oapi::Response::new(description)
                    .add_content("application/json", ErrorBody::to_schema(components)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use beyond::qr_codes::QrStatus;
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn duplicate(res: &mut Response) {
        res.render(ApiError::conflict("offer already claimed").with_reason("already claimed"));
    }

    #[handler]
    async fn expired(res: &mut Response) {
        res.render(
            ApiError::bad_request("qr code has expired").with_status(QrStatus::Expired.as_str()),
        );
    }

    #[tokio::test]
    async fn renders_status_code_and_reason() -> TestResult {
        let service = Service::new(Router::new().get(duplicate));

        let mut res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.error, "offer already claimed");
        assert_eq!(body.reason.as_deref(), Some("already claimed"));
        assert_eq!(body.status, None);

        Ok(())
    }

    #[tokio::test]
    async fn omits_absent_fields_from_body() -> TestResult {
        let service = Service::new(Router::new().get(expired));

        let body = TestClient::get("http://example.com")
            .send(&service)
            .await
            .take_string()
            .await?;

        assert_eq!(
            body,
            r#"{"error":"qr code has expired","status":"expired"}"#
        );

        Ok(())
    }

    #[test]
    fn displays_the_error_message() {
        assert_eq!(
            ApiError::not_found("qr code not found").to_string(),
            "qr code not found"
        );
    }
}
