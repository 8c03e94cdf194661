//! Test helpers.

use std::sync::Arc;

use beyond::{engagements::EngagementStatus, qr_codes::QrStatus};
use beyond_app::{
    context::AppContext,
    domain::{
        advertisers::{MockAdvertisersService, records::AdvertiserUuid},
        analytics::MockAnalyticsService,
        engagements::records::{EngagementRecord, EngagementUuid},
        qr_codes::{
            MockQrCodesService,
            records::{QrCodeRecord, QrCodeUuid},
        },
        scans::MockScansService,
    },
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_ADVERTISER_UUID: AdvertiserUuid = AdvertiserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_advertiser(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_advertiser_uuid(TEST_ADVERTISER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_advertisers_mock() -> MockAdvertisersService {
    let mut advertisers = MockAdvertisersService::new();

    advertisers.expect_create_advertiser().never();
    advertisers.expect_authenticate_bearer().never();

    advertisers
}

fn strict_qr_codes_mock() -> MockQrCodesService {
    let mut qr_codes = MockQrCodesService::new();

    qr_codes.expect_generate_qr_code().never();
    qr_codes.expect_get_qr_code().never();
    qr_codes.expect_deactivate_qr_code().never();
    qr_codes.expect_sweep_statuses().never();

    qr_codes
}

fn strict_scans_mock() -> MockScansService {
    let mut scans = MockScansService::new();

    scans.expect_scan().never();

    scans
}

fn strict_analytics_mock() -> MockAnalyticsService {
    let mut analytics = MockAnalyticsService::new();

    analytics.expect_campaign_analytics().never();

    analytics
}

fn state(
    advertisers: MockAdvertisersService,
    qr_codes: MockQrCodesService,
    scans: MockScansService,
    analytics: MockAnalyticsService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        advertisers: Arc::new(advertisers),
        qr_codes: Arc::new(qr_codes),
        scans: Arc::new(scans),
        analytics: Arc::new(analytics),
    })
}

pub(crate) fn state_with_advertisers(advertisers: MockAdvertisersService) -> Arc<State> {
    state(
        advertisers,
        strict_qr_codes_mock(),
        strict_scans_mock(),
        strict_analytics_mock(),
    )
}

pub(crate) fn qr_codes_service(qr_codes: MockQrCodesService, route: Router) -> Service {
    let state = state(
        strict_advertisers_mock(),
        qr_codes,
        strict_scans_mock(),
        strict_analytics_mock(),
    );

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_advertiser)
            .push(route),
    )
}

pub(crate) fn scans_service(scans: MockScansService, route: Router) -> Service {
    let state = state(
        strict_advertisers_mock(),
        strict_qr_codes_mock(),
        scans,
        strict_analytics_mock(),
    );

    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn analytics_service(analytics: MockAnalyticsService, route: Router) -> Service {
    let state = state(
        strict_advertisers_mock(),
        strict_qr_codes_mock(),
        strict_scans_mock(),
        analytics,
    );

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_advertiser)
            .push(route),
    )
}

pub(crate) fn make_qr_code(campaign_id: &str) -> QrCodeRecord {
    let now = Timestamp::now();

    QrCodeRecord {
        uuid: QrCodeUuid::new(),
        advertiser_uuid: TEST_ADVERTISER_UUID,
        campaign_id: campaign_id.to_owned(),
        code: "BT-7K2M9QX4HD1A".to_owned(),
        promo_title: "20% Off".to_owned(),
        promo_description: Some("On your next ride".to_owned()),
        promo_link: "https://example.com/deal".to_owned(),
        promo_terms: Some("One per customer".to_owned()),
        image_url: "https://cdn.beyond.test/qr-codes/BT-7K2M9QX4HD1A.png".to_owned(),
        status: QrStatus::Active,
        expires_at: None,
        max_scans: None,
        scans_count: 0,
        unique_scans_count: 0,
        redemptions_count: 0,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn make_engagement(
    qr_code: &QrCodeRecord,
    device_id: &str,
    status: EngagementStatus,
) -> EngagementRecord {
    EngagementRecord {
        uuid: EngagementUuid::new(),
        qr_code_uuid: qr_code.uuid,
        device_id: device_id.to_owned(),
        status,
        redemption_code: (status == EngagementStatus::Redeemed).then(|| "Q7Z2K9M4X1B8".to_owned()),
        reason: None,
        ip_address: None,
        user_agent: None,
        magazine_barcode: None,
        driver_id: None,
        scanned_at: Timestamp::now(),
    }
}
