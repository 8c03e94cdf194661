//! Advertisers service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::advertisers::{
        data::NewAdvertiser,
        errors::AdvertisersServiceError,
        records::{AdvertiserRecord, AdvertiserUuid},
        repository::PgAdvertisersRepository,
        tokens::hash_api_token,
    },
};

#[derive(Debug, Clone)]
pub struct PgAdvertisersService {
    db: Db,
    repository: PgAdvertisersRepository,
}

impl PgAdvertisersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAdvertisersRepository::new(),
        }
    }
}

#[async_trait]
impl AdvertisersService for PgAdvertisersService {
    async fn create_advertiser(
        &self,
        advertiser: NewAdvertiser,
    ) -> Result<AdvertiserRecord, AdvertisersServiceError> {
        if advertiser.name.trim().is_empty() || advertiser.token_hash.is_empty() {
            return Err(AdvertisersServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_advertiser(&mut tx, advertiser).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn authenticate_bearer(
        &self,
        token: &str,
    ) -> Result<AdvertiserUuid, AdvertisersServiceError> {
        if token.is_empty() {
            return Err(AdvertisersServiceError::Unauthorized);
        }

        let mut tx = self.db.begin_transaction().await?;

        let advertiser = self
            .repository
            .find_advertiser_by_token_hash(&mut tx, &hash_api_token(token))
            .await?;

        tx.commit().await?;

        advertiser.ok_or_else(|| {
            debug!("bearer token did not match an active api token");

            AdvertisersServiceError::Unauthorized
        })
    }
}

#[automock]
#[async_trait]
/// Advertiser accounts and their API tokens.
pub trait AdvertisersService: Send + Sync {
    /// Creates an advertiser together with its first API token.
    async fn create_advertiser(
        &self,
        advertiser: NewAdvertiser,
    ) -> Result<AdvertiserRecord, AdvertisersServiceError>;

    /// Resolves a raw bearer token to the advertiser that owns it.
    async fn authenticate_bearer(
        &self,
        token: &str,
    ) -> Result<AdvertiserUuid, AdvertisersServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::query;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{domain::advertisers::tokens::generate_api_token, test::TestContext};

    use super::*;

    fn new_advertiser(name: &str, token: &str) -> NewAdvertiser {
        NewAdvertiser {
            uuid: AdvertiserUuid::new(),
            name: name.to_string(),
            token_uuid: Uuid::now_v7(),
            token_hash: hash_api_token(token),
        }
    }

    #[tokio::test]
    async fn create_advertiser_returns_uuid_and_name() -> TestResult {
        let ctx = TestContext::new().await;
        let advertiser = new_advertiser("Coastal Coffee", &generate_api_token());
        let uuid = advertiser.uuid;

        let created = ctx.advertisers.create_advertiser(advertiser).await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.name, "Coastal Coffee");
        assert!(created.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_advertiser_blank_name_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .advertisers
            .create_advertiser(new_advertiser("   ", "bt_token"))
            .await;

        assert!(
            matches!(result, Err(AdvertisersServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_advertiser_reused_token_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.advertisers
            .create_advertiser(new_advertiser("First", "bt_shared"))
            .await?;

        let result = ctx
            .advertisers
            .create_advertiser(new_advertiser("Second", "bt_shared"))
            .await;

        assert!(
            matches!(result, Err(AdvertisersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn authenticate_bearer_resolves_owner() -> TestResult {
        let ctx = TestContext::new().await;

        let resolved = ctx.advertisers.authenticate_bearer(&ctx.api_token).await?;

        assert_eq!(resolved, ctx.advertiser_uuid);

        Ok(())
    }

    #[tokio::test]
    async fn authenticate_bearer_unknown_token_is_unauthorized() {
        let ctx = TestContext::new().await;

        let result = ctx.advertisers.authenticate_bearer("bt_not_a_token").await;

        assert!(
            matches!(result, Err(AdvertisersServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );
    }

    #[tokio::test]
    async fn authenticate_bearer_revoked_token_is_unauthorized() -> TestResult {
        let ctx = TestContext::new().await;

        query("UPDATE advertiser_api_tokens SET revoked_at = now()")
            .execute(ctx.db.pool())
            .await?;

        let result = ctx.advertisers.authenticate_bearer(&ctx.api_token).await;

        assert!(
            matches!(result, Err(AdvertisersServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );

        Ok(())
    }
}
