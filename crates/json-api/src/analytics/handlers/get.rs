//! Campaign Analytics Handler

use std::sync::Arc;

use beyond::analytics::{StatusBreakdown, truncate_device_id};
use rust_decimal::prelude::ToPrimitive as _;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beyond_app::domain::{
    analytics::data::CampaignAnalytics, engagements::records::EngagementRecord,
};

use crate::{analytics::errors::into_api_error, errors::ApiError, extensions::*, state::State};

const CAMPAIGN_ID_QUERY: &str = "campaignId";

/// Engagement counts per status, always listing all four
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusBreakdownResponse {
    pub scanned: u64,
    pub duplicate: u64,
    pub redeemed: u64,
    pub failed: u64,
}

impl From<StatusBreakdown> for StatusBreakdownResponse {
    fn from(breakdown: StatusBreakdown) -> Self {
        StatusBreakdownResponse {
            scanned: breakdown.scanned,
            duplicate: breakdown.duplicate,
            redeemed: breakdown.redeemed,
            failed: breakdown.failed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecentScanResponse {
    pub id: Uuid,

    /// First characters of the device identifier followed by `...`
    pub device_id: String,

    pub status: String,

    pub scanned_at: String,
}

impl From<EngagementRecord> for RecentScanResponse {
    fn from(engagement: EngagementRecord) -> Self {
        RecentScanResponse {
            id: engagement.uuid.into_uuid(),
            device_id: truncate_device_id(&engagement.device_id),
            status: engagement.status.to_string(),
            scanned_at: engagement.scanned_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CampaignAnalyticsResponse {
    /// Redeeming scans
    pub total_scans: u64,

    /// Devices whose first scan redeemed the offer
    pub unique_devices: u64,

    pub redemptions: u64,

    /// Redemptions per hundred scans, to 2 decimal places
    pub conversion_rate: f64,

    /// Current QR code status
    pub status: String,

    pub status_breakdown: StatusBreakdownResponse,

    /// Latest engagements, newest first
    pub recent_scans: Vec<RecentScanResponse>,
}

impl From<CampaignAnalytics> for CampaignAnalyticsResponse {
    fn from(analytics: CampaignAnalytics) -> Self {
        let conversion_rate = analytics.conversion_rate().to_f64().unwrap_or_default();

        CampaignAnalyticsResponse {
            total_scans: analytics.qr_code.scans_count,
            unique_devices: analytics.qr_code.unique_scans_count,
            redemptions: analytics.qr_code.redemptions_count,
            conversion_rate,
            status: analytics.qr_code.status.to_string(),
            status_breakdown: analytics.breakdown.into(),
            recent_scans: analytics
                .recent_scans
                .into_iter()
                .map(RecentScanResponse::from)
                .collect(),
        }
    }
}

/// Analytics Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AnalyticsResponse {
    pub success: bool,

    pub analytics: CampaignAnalyticsResponse,
}

/// Campaign Analytics Handler
///
/// Reports scan and redemption figures for the campaign named by `?campaignId=`.
#[endpoint(
    tags("analytics"),
    summary = "Campaign Analytics",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let advertiser = depot.advertiser_uuid_or_401()?;

    let campaign_id = req
        .query::<String>(CAMPAIGN_ID_QUERY)
        .filter(|campaign_id| !campaign_id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("missing required field: campaignId"))?;

    let analytics = state
        .app
        .analytics
        .campaign_analytics(advertiser, campaign_id.trim())
        .await
        .map_err(into_api_error)?;

    Ok(Json(AnalyticsResponse {
        success: true,
        analytics: analytics.into(),
    }))
}
