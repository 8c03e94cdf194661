//! Scans service.
//!
//! Each scan runs in a single transaction holding the QR code's row lock, so the
//! duplicate check, the scan limit check and the counter updates of concurrent
//! scans of one code cannot interleave.

use async_trait::async_trait;
use beyond::{
    codes::redemption_code,
    engagements::EngagementStatus,
    scans::{ScanDecision, decide},
};
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        engagements::{
            data::NewEngagement, records::EngagementUuid, repository::PgEngagementsRepository,
        },
        qr_codes::{records::QrCodeRecord, repository::PgQrCodesRepository},
        scans::{
            data::{Redemption, ScanRequest},
            errors::{DUPLICATE_REASON, ScansServiceError},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgScansService {
    db: Db,
    qr_codes: PgQrCodesRepository,
    engagements: PgEngagementsRepository,
}

impl PgScansService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            qr_codes: PgQrCodesRepository::new(),
            engagements: PgEngagementsRepository::new(),
        }
    }

    async fn record_rejection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        qr_code: &QrCodeRecord,
        request: ScanRequest,
        status: EngagementStatus,
        reason: &str,
    ) -> Result<(), ScansServiceError> {
        self.engagements
            .create_engagement(
                tx,
                NewEngagement {
                    uuid: EngagementUuid::new(),
                    qr_code_uuid: qr_code.uuid,
                    device_id: request.device_id,
                    status,
                    redemption_code: None,
                    reason: Some(reason.to_string()),
                    origin: request.origin,
                },
            )
            .await?;

        Ok(())
    }
}

fn normalise(request: ScanRequest) -> Result<ScanRequest, ScansServiceError> {
    let qr_code = request.qr_code.trim();
    let device_id = request.device_id.trim();

    if qr_code.is_empty() {
        return Err(ScansServiceError::MissingField("qrCode"));
    }

    if device_id.is_empty() {
        return Err(ScansServiceError::MissingField("deviceId"));
    }

    Ok(ScanRequest {
        qr_code: qr_code.to_string(),
        device_id: device_id.to_string(),
        origin: request.origin,
    })
}

#[async_trait]
impl ScansService for PgScansService {
    async fn scan(&self, request: ScanRequest) -> Result<Redemption, ScansServiceError> {
        let request = normalise(request)?;
        let now = Timestamp::now();

        let mut tx = self.db.begin_transaction().await?;

        let qr_code = self
            .qr_codes
            .lock_qr_code_by_code(&mut tx, &request.qr_code)
            .await?
            .ok_or(ScansServiceError::NotFound)?;

        let history = self
            .engagements
            .device_history(&mut tx, qr_code.uuid, &request.device_id)
            .await?;

        let decision = decide(&qr_code.state(), &history, now);

        debug!(
            qr_code.uuid = %qr_code.uuid,
            device.engagements = history.engagements,
            ?decision,
            "evaluated scan"
        );

        if let Some(status) = decision.transition() {
            self.qr_codes
                .settle_status(&mut tx, qr_code.uuid, status)
                .await?;

            info!(qr_code.uuid = %qr_code.uuid, %status, "qr code left active");
        }

        let outcome = match decision {
            ScanDecision::Redeem { first_for_device } => {
                let code = redemption_code(&mut rand::thread_rng());

                let engagement = self
                    .engagements
                    .create_engagement(
                        &mut tx,
                        NewEngagement {
                            uuid: EngagementUuid::new(),
                            qr_code_uuid: qr_code.uuid,
                            device_id: request.device_id,
                            status: EngagementStatus::Redeemed,
                            redemption_code: Some(code),
                            reason: None,
                            origin: request.origin,
                        },
                    )
                    .await?;

                let qr_code = self
                    .qr_codes
                    .record_redemption(&mut tx, qr_code.uuid, first_for_device)
                    .await?;

                Ok(Redemption {
                    qr_code,
                    engagement,
                })
            }
            ScanDecision::Ineligible { status } => {
                self.record_rejection(
                    &mut tx,
                    &qr_code,
                    request,
                    EngagementStatus::Failed,
                    status.as_str(),
                )
                .await?;

                Err(ScansServiceError::Ineligible(status))
            }
            ScanDecision::Duplicate => {
                self.record_rejection(
                    &mut tx,
                    &qr_code,
                    request,
                    EngagementStatus::Duplicate,
                    DUPLICATE_REASON,
                )
                .await?;

                Err(ScansServiceError::Duplicate)
            }
            ScanDecision::Expire => Err(ScansServiceError::Expired),
            ScanDecision::Exhaust => Err(ScansServiceError::Exhausted),
        };

        tx.commit().await?;

        if let Ok(redemption) = &outcome {
            info!(
                qr_code.uuid = %redemption.qr_code.uuid,
                engagement.uuid = %redemption.engagement.uuid,
                first_for_device = matches!(
                    decision,
                    ScanDecision::Redeem {
                        first_for_device: true
                    }
                ),
                "issued redemption"
            );
        }

        outcome
    }
}

#[automock]
#[async_trait]
/// Scan/redemption flow for printed QR codes.
pub trait ScansService: Send + Sync {
    /// Evaluates a scan, recording its engagement and issuing a redemption code when
    /// the device is eligible.
    ///
    /// Rejections that change state (a failed or duplicate engagement, a status
    /// transition) are committed before the rejection is returned.
    async fn scan(&self, request: ScanRequest) -> Result<Redemption, ScansServiceError>;
}
