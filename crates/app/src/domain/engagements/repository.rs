//! Engagements Repository

use beyond::{
    analytics::StatusBreakdown,
    engagements::{DeviceHistory, EngagementStatus},
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::decode_count,
    domain::{
        engagements::{
            data::NewEngagement,
            records::{EngagementRecord, EngagementUuid},
        },
        qr_codes::records::QrCodeUuid,
    },
};

const CREATE_ENGAGEMENT_SQL: &str = include_str!("sql/create_engagement.sql");
const DEVICE_HISTORY_SQL: &str = include_str!("sql/device_history.sql");
const STATUS_BREAKDOWN_SQL: &str = include_str!("sql/status_breakdown.sql");
const RECENT_ENGAGEMENTS_SQL: &str = include_str!("sql/recent_engagements.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEngagementsRepository;

impl PgEngagementsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_engagement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        engagement: NewEngagement,
    ) -> Result<EngagementRecord, sqlx::Error> {
        query_as::<Postgres, EngagementRecord>(CREATE_ENGAGEMENT_SQL)
            .bind(engagement.uuid.into_uuid())
            .bind(engagement.qr_code_uuid.into_uuid())
            .bind(engagement.device_id)
            .bind(engagement.status.as_str())
            .bind(engagement.redemption_code)
            .bind(engagement.reason)
            .bind(engagement.origin.ip_address)
            .bind(engagement.origin.user_agent)
            .bind(engagement.origin.magazine_barcode)
            .bind(engagement.origin.driver_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn device_history(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        qr_code: QrCodeUuid,
        device_id: &str,
    ) -> Result<DeviceHistory, sqlx::Error> {
        let row = query(DEVICE_HISTORY_SQL)
            .bind(qr_code.into_uuid())
            .bind(device_id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(DeviceHistory {
            engagements: decode_count("engagements", row.try_get("engagements")?)?,
            claims: decode_count("claims", row.try_get("claims")?)?,
        })
    }

    pub(crate) async fn status_breakdown(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        qr_code: QrCodeUuid,
    ) -> Result<StatusBreakdown, sqlx::Error> {
        let rows = query(STATUS_BREAKDOWN_SQL)
            .bind(qr_code.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| -> sqlx::Result<(EngagementStatus, u64)> {
                Ok((
                    decode_status(row)?,
                    decode_count("count", row.try_get("count")?)?,
                ))
            })
            .collect()
    }

    pub(crate) async fn recent_engagements(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        qr_code: QrCodeUuid,
        limit: u32,
    ) -> Result<Vec<EngagementRecord>, sqlx::Error> {
        query_as::<Postgres, EngagementRecord>(RECENT_ENGAGEMENTS_SQL)
            .bind(qr_code.into_uuid())
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }
}

fn decode_status(row: &PgRow) -> sqlx::Result<EngagementStatus> {
    row.try_get::<String, _>("status")?
        .parse::<EngagementStatus>()
        .map_err(|error| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(error),
        })
}

impl<'r> FromRow<'r, PgRow> for EngagementRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: EngagementUuid::from_uuid(row.try_get("uuid")?),
            qr_code_uuid: QrCodeUuid::from_uuid(row.try_get("qr_code_uuid")?),
            device_id: row.try_get("device_id")?,
            status: decode_status(row)?,
            redemption_code: row.try_get("redemption_code")?,
            reason: row.try_get("reason")?,
            ip_address: row.try_get("ip_address")?,
            user_agent: row.try_get("user_agent")?,
            magazine_barcode: row.try_get("magazine_barcode")?,
            driver_id: row.try_get("driver_id")?,
            scanned_at: row.try_get::<SqlxTimestamp, _>("scanned_at")?.to_jiff(),
        })
    }
}
