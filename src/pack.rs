// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! `Pack` (2.20.3+/3.x): a row recording a single library change-tracking
//! handshake with another device. `packId` identifies the pack itself;
//! `changeLogDatabaseUuid`/`changeLogId` point at the change-log position of
//! the other library at the time of the pack. `lastPackTime`/`changeLogId`
//! are backfilled by `trigger_after_insert_Pack_timestamp`/
//! `trigger_after_insert_Pack_changeLogId` when left at their trigger
//! sentinels (`NULL`/`0`), so [`Pack::add`] leaves them alone on insert.

use futures_util::stream::BoxStream;
use sqlx::{FromRow, SqliteConnection, SqliteExecutor, types::time::OffsetDateTime};

use crate::{DbUuid, Error, Result};

crate::db_id!(PackId);
crate::db_uuid!(PackUuid);

#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct Pack {
    pub id: PackId,
    pub pack_id: PackUuid,
    pub change_log_database_uuid: DbUuid,
    pub change_log_id: i64,
    pub last_pack_time: Option<OffsetDateTime>,
}

impl Pack {
    /// Fetches all [`Pack`]s asynchronously.
    ///
    /// Unfiltered and in no particular order.
    #[must_use]
    pub fn fetch_all<'a>(executor: impl SqliteExecutor<'a> + 'a) -> BoxStream<'a, sqlx::Result<Self>> {
        sqlx::query_as(r"SELECT * FROM Pack").fetch(executor)
    }

    /// Loads a single [`Pack`] by id.
    ///
    /// Returns `Ok(None)` if the requested [`Pack`] has not been found.
    pub async fn try_load(executor: impl SqliteExecutor<'_>, id: PackId) -> sqlx::Result<Option<Self>> {
        sqlx::query_as(r"SELECT * FROM Pack WHERE id=?1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Records a new pack against `change_log_database_uuid`, generating a
    /// fresh `packId`. `changeLogId`/`lastPackTime` are left at their
    /// trigger sentinels and backfilled by the schema.
    pub async fn add(conn: &mut SqliteConnection, change_log_database_uuid: &DbUuid) -> Result<PackId> {
        let pack_id = PackUuid::from_uuid(uuid::Uuid::new_v4());
        sqlx::query_scalar(
            r"INSERT INTO Pack (packId, changeLogDatabaseUuid, changeLogId)
              VALUES (?1, ?2, 0)
              RETURNING id",
        )
        .bind(pack_id)
        .bind(change_log_database_uuid)
        .fetch_one(&mut *conn)
        .await
        .map_err(Error::Sqlx)
    }

    /// Deletes the pack with the given id.
    ///
    /// Returns `false` if no such pack existed.
    pub async fn remove(conn: &mut SqliteConnection, id: PackId) -> Result<bool> {
        let result = sqlx::query(r"DELETE FROM Pack WHERE id=?1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        Ok(result.rows_affected() == 1)
    }

    /// All pack ids, unfiltered and in no particular order.
    #[must_use]
    pub fn all_ids<'a>(executor: impl SqliteExecutor<'a> + 'a) -> BoxStream<'a, sqlx::Result<PackId>> {
        sqlx::query_scalar(r"SELECT id FROM Pack").fetch(executor)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::Connection as _;

    use super::Pack;
    use crate::DbUuid;
    use crate::schema::SchemaCreatorValidator as _;
    use crate::version::SchemaVariant;

    async fn unified_conn() -> sqlx::SqliteConnection {
        let mut conn = sqlx::SqliteConnection::connect("sqlite::memory:").await.unwrap();
        SchemaVariant::V3_1_0.creator_validator().create(&mut conn).await.unwrap();
        conn
    }

    #[tokio::test]
    async fn add_then_remove() {
        let mut conn = unified_conn().await;
        let id = Pack::add(&mut conn, &DbUuid::nil()).await.unwrap();
        let pack = Pack::try_load(&mut conn, id).await.unwrap().unwrap();
        assert_eq!(pack.change_log_id, 1);
        assert!(pack.last_pack_time.is_some());
        assert!(Pack::remove(&mut conn, id).await.unwrap());
        assert!(Pack::try_load(&mut conn, id).await.unwrap().is_none());
    }
}
