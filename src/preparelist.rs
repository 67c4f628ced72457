// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use futures_util::stream::BoxStream;
use sqlx::{FromRow, SqliteConnection, SqliteExecutor};

use crate::{Entity, Error, Result, TrackId};

crate::db_id!(PreparelistEntryId);

/// Entry in the _Preparelist_.
///
/// The terminology used in the schema is confusing and the table
/// should have been named `PreparelistEntry` instead of `PreparelistEntity`.
#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct PreparelistEntry {
    pub id: PreparelistEntryId,
    pub track_id: TrackId,
    pub track_number: i64,
}

impl PreparelistEntry {
    /// Checks if the table is available in the database.
    pub async fn is_available<'a>(executor: impl SqliteExecutor<'a> + 'a) -> sqlx::Result<bool> {
        let (exists,) = sqlx::query_as(
            r"SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='PreparelistEntity')",
        )
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Fetches all [`PreparelistEntry`]s asynchronously.
    ///
    /// Unfiltered and in no particular order.
    #[must_use]
    pub fn fetch_all<'a>(
        executor: impl SqliteExecutor<'a> + 'a,
    ) -> BoxStream<'a, sqlx::Result<Self>> {
        sqlx::query_as(r"SELECT * FROM PreparelistEntity").fetch(executor)
    }

    /// Loads a single [`PreparelistEntry`] by ID.
    ///
    /// Returns `Ok(None)` if the requested [`PreparelistEntry`] has not been found.
    pub async fn try_load(
        executor: impl SqliteExecutor<'_>,
        id: PreparelistEntryId,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as(r"SELECT * FROM PreparelistEntity WHERE id=?1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Appends `track_id` to the preparelist at `track_number`.
    pub async fn add(conn: &mut SqliteConnection, track_id: TrackId, track_number: i64) -> Result<PreparelistEntryId> {
        sqlx::query_scalar(r"INSERT INTO PreparelistEntity (trackId, trackNumber) VALUES (?1, ?2) RETURNING id")
            .bind(track_id)
            .bind(track_number)
            .fetch_one(&mut *conn)
            .await
            .map_err(Error::Sqlx)
    }

    /// Sets the `trackNumber` column.
    pub async fn set_track_number(conn: &mut SqliteConnection, id: PreparelistEntryId, track_number: i64) -> Result<()> {
        let result = sqlx::query(r"UPDATE PreparelistEntity SET trackNumber=?1 WHERE id=?2")
            .bind(track_number)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Error::RowIdError {
                entity: Entity::PreparelistEntity,
                message: format!("no preparelist entry with id {id}"),
            });
        }
        Ok(())
    }

    /// Deletes the preparelist entry with the given id.
    ///
    /// Returns `false` if no such entry existed.
    pub async fn remove(conn: &mut SqliteConnection, id: PreparelistEntryId) -> Result<bool> {
        let result = sqlx::query(r"DELETE FROM PreparelistEntity WHERE id=?1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        Ok(result.rows_affected() == 1)
    }

    /// All preparelist entry ids, unfiltered and in no particular order.
    #[must_use]
    pub fn all_ids<'a>(executor: impl SqliteExecutor<'a> + 'a) -> BoxStream<'a, sqlx::Result<PreparelistEntryId>> {
        sqlx::query_scalar(r"SELECT id FROM PreparelistEntity").fetch(executor)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::Connection as _;

    use super::PreparelistEntry;
    use crate::schema::SchemaCreatorValidator as _;
    use crate::track::Track;
    use crate::version::SchemaVariant;

    async fn unified_conn() -> sqlx::SqliteConnection {
        let mut conn = sqlx::SqliteConnection::connect("sqlite::memory:").await.unwrap();
        SchemaVariant::V3_1_0.creator_validator().create(&mut conn).await.unwrap();
        conn
    }

    #[tokio::test]
    async fn add_set_track_number_then_remove() {
        let mut conn = unified_conn().await;
        let track_id = Track::add(&mut conn, "../Music/track.mp3").await.unwrap();
        let id = PreparelistEntry::add(&mut conn, track_id, 1).await.unwrap();
        PreparelistEntry::set_track_number(&mut conn, id, 2).await.unwrap();
        assert_eq!(PreparelistEntry::try_load(&mut conn, id).await.unwrap().unwrap().track_number, 2);
        assert!(PreparelistEntry::remove(&mut conn, id).await.unwrap());
        assert!(PreparelistEntry::try_load(&mut conn, id).await.unwrap().is_none());
    }
}
