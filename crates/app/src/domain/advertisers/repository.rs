//! Advertisers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::advertisers::{
    data::NewAdvertiser,
    records::{AdvertiserRecord, AdvertiserUuid},
};

const CREATE_ADVERTISER_SQL: &str = include_str!("sql/create_advertiser.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_ADVERTISER_BY_TOKEN_HASH_SQL: &str =
    include_str!("sql/find_advertiser_by_token_hash.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAdvertisersRepository;

impl PgAdvertisersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_advertiser(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        advertiser: NewAdvertiser,
    ) -> Result<AdvertiserRecord, sqlx::Error> {
        let record = query_as::<Postgres, AdvertiserRecord>(CREATE_ADVERTISER_SQL)
            .bind(advertiser.uuid.into_uuid())
            .bind(advertiser.name)
            .fetch_one(&mut **tx)
            .await?;

        query(CREATE_API_TOKEN_SQL)
            .bind(advertiser.token_uuid)
            .bind(record.uuid.into_uuid())
            .bind(advertiser.token_hash)
            .execute(&mut **tx)
            .await?;

        Ok(record)
    }

    pub(crate) async fn find_advertiser_by_token_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<Option<AdvertiserUuid>, sqlx::Error> {
        let uuid: Option<Uuid> = query_scalar(FIND_ADVERTISER_BY_TOKEN_HASH_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(uuid.map(AdvertiserUuid::from_uuid))
    }
}

impl<'r> FromRow<'r, PgRow> for AdvertiserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AdvertiserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
