//! QR Codes Repository

use beyond::qr_codes::QrStatus;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{decode_count, encode_count},
    domain::{
        advertisers::records::AdvertiserUuid,
        qr_codes::{
            data::NewQrCode,
            records::{QrCodeRecord, QrCodeUuid},
        },
    },
};

const CREATE_QR_CODE_SQL: &str = include_str!("sql/create_qr_code.sql");
const GET_QR_CODE_SQL: &str = include_str!("sql/get_qr_code.sql");
const LOCK_QR_CODE_SQL: &str = include_str!("sql/lock_qr_code.sql");
const FIND_QR_CODE_BY_CAMPAIGN_SQL: &str = include_str!("sql/find_qr_code_by_campaign.sql");
const LOCK_QR_CODE_BY_CODE_SQL: &str = include_str!("sql/lock_qr_code_by_code.sql");
const LIST_ACTIVE_QR_CODES_SQL: &str = include_str!("sql/list_active_qr_codes.sql");
const SETTLE_QR_CODE_STATUS_SQL: &str = include_str!("sql/settle_qr_code_status.sql");
const RECORD_REDEMPTION_SQL: &str = include_str!("sql/record_redemption.sql");

/// Generated values persisted alongside an advertiser's [`NewQrCode`].
#[derive(Debug, Clone)]
pub(crate) struct QrCodeAssets {
    pub(crate) uuid: QrCodeUuid,
    pub(crate) code: String,
    pub(crate) image_url: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgQrCodesRepository;

impl PgQrCodesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_qr_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        advertiser: AdvertiserUuid,
        assets: QrCodeAssets,
        qr_code: NewQrCode,
    ) -> Result<QrCodeRecord, sqlx::Error> {
        let max_scans = qr_code
            .max_scans
            .map(|max| encode_count("max_scans", max))
            .transpose()?;

        query_as::<Postgres, QrCodeRecord>(CREATE_QR_CODE_SQL)
            .bind(assets.uuid.into_uuid())
            .bind(advertiser.into_uuid())
            .bind(qr_code.campaign_id)
            .bind(assets.code)
            .bind(qr_code.promo_title)
            .bind(qr_code.promo_description)
            .bind(qr_code.promo_link)
            .bind(qr_code.promo_terms)
            .bind(assets.image_url)
            .bind(qr_code.expires_at.map(SqlxTimestamp::from))
            .bind(max_scans)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_qr_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        advertiser: AdvertiserUuid,
        qr_code: QrCodeUuid,
    ) -> Result<QrCodeRecord, sqlx::Error> {
        query_as::<Postgres, QrCodeRecord>(GET_QR_CODE_SQL)
            .bind(qr_code.into_uuid())
            .bind(advertiser.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an advertiser's QR code and hold its row lock until the transaction ends.
    pub(crate) async fn lock_qr_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        advertiser: AdvertiserUuid,
        qr_code: QrCodeUuid,
    ) -> Result<QrCodeRecord, sqlx::Error> {
        query_as::<Postgres, QrCodeRecord>(LOCK_QR_CODE_SQL)
            .bind(qr_code.into_uuid())
            .bind(advertiser.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_qr_code_by_campaign(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        advertiser: AdvertiserUuid,
        campaign_id: &str,
    ) -> Result<Option<QrCodeRecord>, sqlx::Error> {
        query_as::<Postgres, QrCodeRecord>(FIND_QR_CODE_BY_CAMPAIGN_SQL)
            .bind(advertiser.into_uuid())
            .bind(campaign_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch a QR code by its printed code string, locking it for the scan.
    pub(crate) async fn lock_qr_code_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<QrCodeRecord>, sqlx::Error> {
        query_as::<Postgres, QrCodeRecord>(LOCK_QR_CODE_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_active_qr_codes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<QrCodeRecord>, sqlx::Error> {
        query_as::<Postgres, QrCodeRecord>(LIST_ACTIVE_QR_CODES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Move an `active` code into `status`. Returns the number of rows changed,
    /// zero when the code had already left `active`.
    pub(crate) async fn settle_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        qr_code: QrCodeUuid,
        status: QrStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SETTLE_QR_CODE_STATUS_SQL)
            .bind(qr_code.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn record_redemption(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        qr_code: QrCodeUuid,
        first_for_device: bool,
    ) -> Result<QrCodeRecord, sqlx::Error> {
        query_as::<Postgres, QrCodeRecord>(RECORD_REDEMPTION_SQL)
            .bind(qr_code.into_uuid())
            .bind(first_for_device)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for QrCodeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<String, _>("status")?
            .parse::<QrStatus>()
            .map_err(|error| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(error),
            })?;

        let max_scans = row
            .try_get::<Option<i64>, _>("max_scans")?
            .map(|max| decode_count("max_scans", max))
            .transpose()?;

        Ok(Self {
            uuid: QrCodeUuid::from_uuid(row.try_get("uuid")?),
            advertiser_uuid: AdvertiserUuid::from_uuid(row.try_get("advertiser_uuid")?),
            campaign_id: row.try_get("campaign_id")?,
            code: row.try_get("code")?,
            promo_title: row.try_get("promo_title")?,
            promo_description: row.try_get("promo_description")?,
            promo_link: row.try_get("promo_link")?,
            promo_terms: row.try_get("promo_terms")?,
            image_url: row.try_get("image_url")?,
            status,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            max_scans,
            scans_count: decode_count("scans_count", row.try_get("scans_count")?)?,
            unique_scans_count: decode_count(
                "unique_scans_count",
                row.try_get("unique_scans_count")?,
            )?,
            redemptions_count: decode_count(
                "redemptions_count",
                row.try_get("redemptions_count")?,
            )?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
