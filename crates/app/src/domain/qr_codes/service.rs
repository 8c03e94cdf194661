//! QR codes service.

use std::sync::Arc;

use async_trait::async_trait;
use beyond::{codes::qr_code_id, qr_codes::QrStatus};
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info, warn};

use crate::{
    database::Db,
    domain::{
        advertisers::records::AdvertiserUuid,
        qr_codes::{
            data::{GeneratedQrCode, NewQrCode},
            errors::QrCodesServiceError,
            records::{QrCodeRecord, QrCodeUuid},
            repository::{PgQrCodesRepository, QrCodeAssets},
        },
    },
    imaging::QrRenderer,
    storage::ObjectStore,
};

const PNG_CONTENT_TYPE: &str = "image/png";

#[derive(Clone)]
pub struct PgQrCodesService {
    db: Db,
    repository: PgQrCodesRepository,
    renderer: Arc<dyn QrRenderer>,
    store: Arc<dyn ObjectStore>,
}

impl PgQrCodesService {
    #[must_use]
    pub fn new(db: Db, renderer: Arc<dyn QrRenderer>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            db,
            repository: PgQrCodesRepository::new(),
            renderer,
            store,
        }
    }

    async fn persist_qr_code(
        &self,
        advertiser: AdvertiserUuid,
        assets: QrCodeAssets,
        qr_code: NewQrCode,
    ) -> Result<QrCodeRecord, QrCodesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .repository
            .create_qr_code(&mut tx, advertiser, assets, qr_code)
            .await?;

        tx.commit().await?;

        Ok(record)
    }
}

fn validate(qr_code: &NewQrCode) -> Result<(), QrCodesServiceError> {
    for (field, value) in [
        ("campaignId", &qr_code.campaign_id),
        ("promoTitle", &qr_code.promo_title),
        ("promoLink", &qr_code.promo_link),
    ] {
        if value.trim().is_empty() {
            return Err(QrCodesServiceError::MissingField(field));
        }
    }

    // Stored as BIGINT.
    if qr_code
        .max_scans
        .is_some_and(|max| max == 0 || i64::try_from(max).is_err())
    {
        return Err(QrCodesServiceError::InvalidData);
    }

    Ok(())
}

#[async_trait]
impl QrCodesService for PgQrCodesService {
    async fn generate_qr_code(
        &self,
        advertiser: AdvertiserUuid,
        qr_code: NewQrCode,
    ) -> Result<GeneratedQrCode, QrCodesServiceError> {
        validate(&qr_code)?;

        let mut tx = self.db.begin_transaction().await?;

        let existing = self
            .repository
            .find_qr_code_by_campaign(&mut tx, advertiser, &qr_code.campaign_id)
            .await?;

        tx.commit().await?;

        if existing.is_some() {
            return Err(QrCodesServiceError::AlreadyExists);
        }

        let code = qr_code_id(&mut rand::thread_rng());
        let image_png = self.renderer.render_png(&code)?;
        let key = format!("qr-codes/{code}.png");

        let image_url = self
            .store
            .put_object(&key, PNG_CONTENT_TYPE, image_png.clone())
            .await?;

        let assets = QrCodeAssets {
            uuid: QrCodeUuid::new(),
            code,
            image_url,
        };

        let record = match self.persist_qr_code(advertiser, assets, qr_code).await {
            Ok(record) => record,
            Err(error) => {
                if let Err(cleanup) = self.store.delete_object(&key).await {
                    warn!(%key, error = %cleanup, "failed to remove orphaned qr image");
                }

                return Err(error);
            }
        };

        info!(
            qr_code.uuid = %record.uuid,
            qr_code.code = %record.code,
            campaign_id = %record.campaign_id,
            "generated campaign qr code"
        );

        Ok(GeneratedQrCode { record, image_png })
    }

    async fn get_qr_code(
        &self,
        advertiser: AdvertiserUuid,
        qr_code: QrCodeUuid,
    ) -> Result<QrCodeRecord, QrCodesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .repository
            .get_qr_code(&mut tx, advertiser, qr_code)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn deactivate_qr_code(
        &self,
        advertiser: AdvertiserUuid,
        qr_code: QrCodeUuid,
    ) -> Result<QrCodeRecord, QrCodesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .repository
            .lock_qr_code(&mut tx, advertiser, qr_code)
            .await?;

        if record.status.is_terminal() {
            return Err(QrCodesServiceError::NotActive(record.status));
        }

        self.repository
            .settle_status(&mut tx, qr_code, QrStatus::Inactive)
            .await?;

        let record = self
            .repository
            .get_qr_code(&mut tx, advertiser, qr_code)
            .await?;

        tx.commit().await?;

        info!(qr_code.uuid = %qr_code, "deactivated qr code");

        Ok(record)
    }

    async fn sweep_statuses(&self, now: Timestamp) -> Result<u64, QrCodesServiceError> {
        sweep_statuses(&self.db, now).await
    }
}

/// Settle every active QR code against `now`, returning how many changed status.
///
/// Needs only the database, so it can run without the image collaborators.
///
/// # Errors
///
/// Returns an error when the codes cannot be read or updated.
pub async fn sweep_statuses(db: &Db, now: Timestamp) -> Result<u64, QrCodesServiceError> {
    let repository = PgQrCodesRepository::new();
    let mut tx = db.begin_transaction().await?;

    let active = repository.list_active_qr_codes(&mut tx).await?;

    let mut settled = 0;

    for record in active {
        let Some(status) = record.state().settle(now) else {
            continue;
        };

        settled += repository
            .settle_status(&mut tx, record.uuid, status)
            .await?;

        debug!(qr_code.uuid = %record.uuid, %status, "settled qr code status");
    }

    tx.commit().await?;

    info!(settled, "swept qr code statuses");

    Ok(settled)
}

#[automock]
#[async_trait]
/// Campaign QR code registry.
pub trait QrCodesService: Send + Sync {
    /// Generates, renders, uploads and persists a campaign's QR code.
    async fn generate_qr_code(
        &self,
        advertiser: AdvertiserUuid,
        qr_code: NewQrCode,
    ) -> Result<GeneratedQrCode, QrCodesServiceError>;

    /// Retrieve one of the advertiser's QR codes.
    async fn get_qr_code(
        &self,
        advertiser: AdvertiserUuid,
        qr_code: QrCodeUuid,
    ) -> Result<QrCodeRecord, QrCodesServiceError>;

    /// Moves an active QR code to `inactive`.
    async fn deactivate_qr_code(
        &self,
        advertiser: AdvertiserUuid,
        qr_code: QrCodeUuid,
    ) -> Result<QrCodeRecord, QrCodesServiceError>;

    /// Expires or deactivates every active code whose limits were reached by `now`.
    ///
    /// Returns the number of codes that changed status.
    async fn sweep_statuses(&self, now: Timestamp) -> Result<u64, QrCodesServiceError>;
}
