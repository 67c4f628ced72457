// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use futures_util::stream::BoxStream;
use sqlx::{FromRow, SqliteConnection, SqliteExecutor, types::time::OffsetDateTime};

use crate::{AlbumArtId, DbUuid, Entity, Error, Result};

crate::db_id!(TrackId);

#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Reverse-engineered from database schema."
)]
pub struct Track {
    pub id: TrackId,
    pub play_order: Option<i64>,
    pub length: Option<i64>,
    pub bpm: Option<i64>,
    pub year: Option<i64>,
    pub path: Option<String>,
    pub filename: Option<String>,
    pub bitrate: Option<i64>,
    pub bpm_analyzed: Option<f64>,
    pub album_art_id: AlbumArtId,
    pub file_bytes: Option<i64>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub comment: Option<String>,
    pub label: Option<String>,
    pub composer: Option<String>,
    pub remixer: Option<String>,
    pub key: Option<i64>,
    pub rating: Option<i64>,
    pub album_art: Option<String>,
    pub time_last_played: Option<OffsetDateTime>,
    pub is_played: bool,
    pub file_type: Option<String>,
    pub is_analyzed: bool,
    pub date_created: Option<OffsetDateTime>,
    pub date_added: Option<OffsetDateTime>,
    pub is_available: bool,
    pub is_metadata_of_packed_track_changed: bool,
    // Typo in column name of database schema requires renaming.
    #[sqlx(rename = "isPerfomanceDataOfPackedTrackChanged")]
    pub is_performance_data_of_packed_track_changed: bool,
    pub played_indicator: Option<i64>,
    pub is_metadata_imported: bool,
    pub pdb_import_key: Option<i64>,
    pub streaming_source: Option<String>,
    pub uri: Option<String>,
    pub is_beat_grid_locked: bool,
    pub origin_database_uuid: Option<DbUuid>,
    pub origin_track_id: Option<i64>,
    pub streaming_flags: i64,
    pub explicit_lyrics: bool,
    pub last_edit_time: OffsetDateTime,
}

impl Track {
    // Engine DJ writes this string into the `albumArt` column. But many
    // tracks just contain NULL. This value doesn't seem to be needed and
    // the column value could safely be set to NULL.
    pub const DEFAULT_ALBUM_ART: &str = "image://planck/0";

    /// Fetches all [`Track`]s asynchronously.
    ///
    /// Unfiltered and in no particular order.
    #[must_use]
    pub fn fetch_all<'a>(
        executor: impl SqliteExecutor<'a> + 'a,
    ) -> BoxStream<'a, sqlx::Result<Self>> {
        sqlx::query_as(r#"SELECT * FROM "Track""#).fetch(executor)
    }

    /// Loads a single [`Track`] by ID.
    ///
    /// Returns `Ok(None)` if the requested [`Track`] has not been found.
    pub async fn try_load(
        executor: impl SqliteExecutor<'_>,
        id: TrackId,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as(r#"SELECT * FROM "Track" WHERE "id"=?1"#)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Reset unused default album art for tracks with album art.
    pub async fn reset_unused_default_album_art(
        executor: impl SqliteExecutor<'_>,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(r#"UPDATE "Track" SET "albumArt"=NULL WHERE "albumArt"=?1 AND "albumArtId" IS NOT NULL"#)
            .bind(Self::DEFAULT_ALBUM_ART)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Finds the [`TrackId`] of the track whose `path` column exactly
    /// matches `path`, if any.
    ///
    /// `path` is the column's unique key, so at most one row can match.
    pub async fn find_id_by_path(
        executor: impl SqliteExecutor<'_>,
        path: &str,
    ) -> sqlx::Result<Option<TrackId>> {
        sqlx::query_scalar(r#"SELECT "id" FROM "Track" WHERE "path"=?1"#)
            .bind(path)
            .fetch_optional(executor)
            .await
    }

    /// Same lookup as [`Self::find_id_by_path`], returned as a (possibly
    /// singleton) sequence for callers that want a uniform collection type
    /// regardless of whether the path is known to be unique.
    pub async fn tracks_by_relative_path(
        executor: impl SqliteExecutor<'_>,
        path: &str,
    ) -> sqlx::Result<Vec<TrackId>> {
        Ok(Self::find_id_by_path(executor, path).await?.into_iter().collect())
    }

    /// All track ids, unfiltered and in no particular order.
    #[must_use]
    pub fn all_ids<'a>(
        executor: impl SqliteExecutor<'a> + 'a,
    ) -> BoxStream<'a, sqlx::Result<TrackId>> {
        sqlx::query_scalar(r#"SELECT "id" FROM "Track""#).fetch(executor)
    }

    /// Inserts a new track at `path`, leaving every other column at its
    /// schema default. `trigger_after_insert_Track_fix_origin` (present on
    /// v2/v3) backfills `originTrackId`/`originDatabaseUuid` from the new
    /// row's own id and the database's `Information.uuid`.
    pub async fn add(conn: &mut SqliteConnection, path: &str) -> Result<TrackId> {
        sqlx::query_scalar(
            r#"INSERT INTO "Track"
                 ("path", "isPlayed", "isAnalyzed", "isAvailable",
                  "isMetadataOfPackedTrackChanged", "isPerfomanceDataOfPackedTrackChanged",
                  "isMetadataImported", "isBeatGridLocked", "streamingFlags",
                  "explicitLyrics", "lastEditTime")
               VALUES (?1, 0, 0, 0, 0, 0, 0, 0, 0, 0, ?2)
               RETURNING "id""#,
        )
        .bind(path)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut *conn)
        .await
        .map_err(Error::Sqlx)
    }

    /// Deletes the track with the given id.
    ///
    /// Returns `false` if no such track existed.
    pub async fn remove(conn: &mut SqliteConnection, id: TrackId) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM "Track" WHERE "id"=?1"#)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        Ok(result.rows_affected() == 1)
    }

    /// Sets the track's title.
    pub async fn set_title(conn: &mut SqliteConnection, id: TrackId, title: Option<&str>) -> Result<()> {
        let result = sqlx::query(r#"UPDATE "Track" SET "title"=?1 WHERE "id"=?2"#)
            .bind(title)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Error::RowIdError {
                entity: Entity::Track,
                message: format!("no track with id {id}"),
            });
        }
        Ok(())
    }

    /// Sets the track's star rating.
    pub async fn set_rating(conn: &mut SqliteConnection, id: TrackId, rating: Option<i64>) -> Result<()> {
        let result = sqlx::query(r#"UPDATE "Track" SET "rating"=?1 WHERE "id"=?2"#)
            .bind(rating)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Error::RowIdError {
                entity: Entity::Track,
                message: format!("no track with id {id}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Track;
    use crate::schema::SchemaCreatorValidator as _;
    use crate::version::SchemaVariant;

    async fn unified_conn() -> sqlx::SqliteConnection {
        use sqlx::Connection as _;
        let mut conn = sqlx::SqliteConnection::connect("sqlite::memory:").await.unwrap();
        SchemaVariant::V3_1_0
            .creator_validator()
            .create(&mut conn)
            .await
            .unwrap();
        conn
    }

    #[tokio::test]
    async fn find_id_by_path_misses_on_empty_library() {
        let mut conn = unified_conn().await;
        assert_eq!(
            Track::find_id_by_path(&mut conn, "../Music/track.mp3").await.unwrap(),
            None
        );
        assert!(
            Track::tracks_by_relative_path(&mut conn, "../Music/track.mp3")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn add_then_set_title_then_remove() {
        let mut conn = unified_conn().await;
        let id = Track::add(&mut conn, "../Music/track.mp3").await.unwrap();
        assert_eq!(Track::find_id_by_path(&mut conn, "../Music/track.mp3").await.unwrap(), Some(id));
        Track::set_title(&mut conn, id, Some("Title")).await.unwrap();
        assert_eq!(Track::try_load(&mut conn, id).await.unwrap().unwrap().title.as_deref(), Some("Title"));
        assert!(Track::remove(&mut conn, id).await.unwrap());
        assert!(Track::try_load(&mut conn, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_title_on_missing_track_reports_row_id_error() {
        let mut conn = unified_conn().await;
        let err = Track::set_title(&mut conn, super::TrackId::INVALID_MIN_EXCLUSIVE, Some("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::RowIdError { entity: crate::Entity::Track, .. }));
    }
}
