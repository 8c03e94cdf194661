//! Auth middleware.
//!
//! Resolves the advertiser behind a `Bearer` API token. Scanning is public and never
//! passes through here.

use std::sync::Arc;

use beyond_app::domain::advertisers::AdvertisersServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{errors::ApiError, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(ApiError::unauthorized(
            "Missing or invalid Authorization header",
        ));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(api_error) => {
            res.render(api_error);
            ctrl.skip_rest();

            return;
        }
    };

    let advertiser_uuid = match state.app.advertisers.authenticate_bearer(token).await {
        Ok(advertiser_uuid) => advertiser_uuid,
        Err(AdvertisersServiceError::Unauthorized) => {
            res.render(ApiError::unauthorized("Invalid API token"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to validate api token: {source}");

            res.render(ApiError::internal(format!(
                "failed to validate api token: {source}"
            )));
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_advertiser_uuid(advertiser_uuid);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use beyond_app::domain::advertisers::{MockAdvertisersService, records::AdvertiserUuid};
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{errors::ErrorBody, test_helpers::state_with_advertisers};

    use super::*;

    #[salvo::handler]
    async fn echo_advertiser(depot: &mut Depot, res: &mut Response) {
        let advertiser = depot.advertiser_uuid_or_401().ok().map_or_else(
            || "missing".to_string(),
            |uuid: AdvertiserUuid| uuid.to_string(),
        );

        res.render(advertiser);
    }

    fn make_service(advertisers: MockAdvertisersService) -> Service {
        let state = state_with_advertisers(advertisers);

        let router = Router::new()
            .hoop(inject(state))
            .hoop(handler)
            .push(Router::new().get(echo_advertiser));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut advertisers = MockAdvertisersService::new();

        advertisers.expect_authenticate_bearer().never();

        let mut res = TestClient::get("http://example.com")
            .send(&make_service(advertisers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.error, "Missing or invalid Authorization header");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut advertisers = MockAdvertisersService::new();

        advertisers.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(advertisers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() -> TestResult {
        let mut advertisers = MockAdvertisersService::new();

        advertisers
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "bt_abc123")
            .return_once(|_| Err(AdvertisersServiceError::Unauthorized));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer bt_abc123", true)
            .send(&make_service(advertisers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_failure_returns_500() -> TestResult {
        let mut advertisers = MockAdvertisersService::new();

        advertisers
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AdvertisersServiceError::Sql(sqlx::Error::PoolClosed)));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer bt_abc123", true)
            .send(&make_service(advertisers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_advertiser_uuid() -> TestResult {
        let advertiser = AdvertiserUuid::from_uuid(Uuid::nil());

        let mut advertisers = MockAdvertisersService::new();

        advertisers
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "bt_abc123")
            .return_once(move |_| Ok(advertiser));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer  bt_abc123 ", true)
            .send(&make_service(advertisers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, advertiser.to_string());

        Ok(())
    }
}
