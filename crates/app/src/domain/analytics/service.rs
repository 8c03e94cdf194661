//! Analytics service.

use async_trait::async_trait;
use beyond::analytics::RECENT_SCANS_LIMIT;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        advertisers::records::AdvertiserUuid,
        analytics::{data::CampaignAnalytics, errors::AnalyticsServiceError},
        engagements::repository::PgEngagementsRepository,
        qr_codes::repository::PgQrCodesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAnalyticsService {
    db: Db,
    qr_codes: PgQrCodesRepository,
    engagements: PgEngagementsRepository,
}

impl PgAnalyticsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            qr_codes: PgQrCodesRepository::new(),
            engagements: PgEngagementsRepository::new(),
        }
    }
}

#[async_trait]
impl AnalyticsService for PgAnalyticsService {
    async fn campaign_analytics(
        &self,
        advertiser: AdvertiserUuid,
        campaign_id: &str,
    ) -> Result<CampaignAnalytics, AnalyticsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let qr_code = self
            .qr_codes
            .find_qr_code_by_campaign(&mut tx, advertiser, campaign_id)
            .await?
            .ok_or(AnalyticsServiceError::NotFound)?;

        let breakdown = self
            .engagements
            .status_breakdown(&mut tx, qr_code.uuid)
            .await?;

        let recent_scans = self
            .engagements
            .recent_engagements(&mut tx, qr_code.uuid, RECENT_SCANS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(CampaignAnalytics {
            qr_code,
            breakdown,
            recent_scans,
        })
    }
}

#[automock]
#[async_trait]
/// Campaign analytics derived from stored counters and the engagement ledger.
pub trait AnalyticsService: Send + Sync {
    /// Analytics for one of the advertiser's campaigns.
    async fn campaign_analytics(
        &self,
        advertiser: AdvertiserUuid,
        campaign_id: &str,
    ) -> Result<CampaignAnalytics, AnalyticsServiceError>;
}

#[cfg(test)]
mod tests {
    use beyond::engagements::EngagementStatus;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{qr_codes::QrCodesService, scans::ScansService},
        test::{
            TestContext,
            helpers::{new_qr_code, scan_request},
        },
    };

    use super::*;

    #[tokio::test]
    async fn fresh_campaign_reports_zero_conversion() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.qr_codes
            .generate_qr_code(ctx.advertiser_uuid, new_qr_code("camp-1"))
            .await?;

        let analytics = ctx
            .analytics
            .campaign_analytics(ctx.advertiser_uuid, "camp-1")
            .await?;

        assert_eq!(analytics.qr_code.scans_count, 0);
        assert_eq!(analytics.conversion_rate(), Decimal::ZERO);
        assert_eq!(analytics.breakdown.total(), 0);
        assert!(analytics.recent_scans.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn analytics_reflect_scans_and_rejections() -> TestResult {
        let ctx = TestContext::new().await;

        let qr_code = ctx
            .qr_codes
            .generate_qr_code(ctx.advertiser_uuid, new_qr_code("camp-1"))
            .await?
            .record;

        ctx.scans.scan(scan_request(&qr_code.code, "dev-A")).await?;
        ctx.scans.scan(scan_request(&qr_code.code, "dev-B")).await?;

        let _duplicate = ctx.scans.scan(scan_request(&qr_code.code, "dev-A")).await;

        let analytics = ctx
            .analytics
            .campaign_analytics(ctx.advertiser_uuid, "camp-1")
            .await?;

        assert_eq!(analytics.qr_code.scans_count, 2);
        assert_eq!(analytics.qr_code.unique_scans_count, 2);
        assert_eq!(analytics.qr_code.redemptions_count, 2);
        assert_eq!(analytics.conversion_rate(), Decimal::ONE_HUNDRED);
        assert_eq!(analytics.breakdown.get(EngagementStatus::Redeemed), 2);
        assert_eq!(analytics.breakdown.get(EngagementStatus::Duplicate), 1);
        assert_eq!(analytics.recent_scans.len(), 3);

        let newest = analytics.recent_scans.first().ok_or("no recent scans")?;

        assert_eq!(newest.status, EngagementStatus::Duplicate);

        Ok(())
    }

    #[tokio::test]
    async fn recent_scans_are_limited() -> TestResult {
        let ctx = TestContext::new().await;

        let qr_code = ctx
            .qr_codes
            .generate_qr_code(ctx.advertiser_uuid, new_qr_code("camp-1"))
            .await?
            .record;

        for device in 0..12 {
            ctx.scans
                .scan(scan_request(&qr_code.code, &format!("device-{device}")))
                .await?;
        }

        let analytics = ctx
            .analytics
            .campaign_analytics(ctx.advertiser_uuid, "camp-1")
            .await?;

        assert_eq!(analytics.qr_code.scans_count, 12);
        assert_eq!(analytics.recent_scans.len(), 10);

        Ok(())
    }

    #[tokio::test]
    async fn campaign_of_another_advertiser_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_advertiser("Other Advertiser").await;

        ctx.qr_codes
            .generate_qr_code(ctx.advertiser_uuid, new_qr_code("camp-1"))
            .await?;

        let result = ctx.analytics.campaign_analytics(other, "camp-1").await;

        assert!(
            matches!(result, Err(AnalyticsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
