//! Request body parsing for JSON handlers.

use salvo::Request;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ApiError;

/// Parse the request body as JSON, rejecting unreadable bodies with a JSON `400`.
///
/// Used in place of `JsonBody`, whose rejections are not rendered as [`ApiError`]s.
pub(crate) async fn json_body<T>(req: &mut Request) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    req.parse_json::<T>().await.map_err(|error| {
        debug!(%error, "rejected request body");

        ApiError::bad_request("request body must be a valid JSON object")
    })
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde::Deserialize;
    use testresult::TestResult;

    use crate::errors::ErrorBody;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Greeting {
        name: String,
    }

    #[handler]
    async fn greet(req: &mut Request, res: &mut Response) {
        match json_body::<Greeting>(req).await {
            Ok(greeting) => res.render(Text::Plain(greeting.name)),
            Err(error) => res.render(error),
        }
    }

    fn make_service() -> Service {
        Service::new(Router::new().post(greet))
    }

    #[tokio::test]
    async fn parses_valid_json() -> TestResult {
        let body = TestClient::post("http://example.com")
            .json(&serde_json::json!({ "name": "dev-A" }))
            .send(&make_service())
            .await
            .take_string()
            .await?;

        assert_eq!(body, "dev-A");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_is_a_json_400() -> TestResult {
        let mut res = TestClient::post("http://example.com")
            .raw_json("not json")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.error, "request body must be a valid JSON object");

        Ok(())
    }

    #[tokio::test]
    async fn mistyped_field_is_a_json_400() -> TestResult {
        let mut res = TestClient::post("http://example.com")
            .json(&serde_json::json!({ "name": 5 }))
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.error, "request body must be a valid JSON object");

        Ok(())
    }
}
