// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Crates (v1 schema only): a user-curated, nestable folder of tracks,
//! stored as a discriminated subset of the polymorphic `List` table
//! (`type = 4`) and surfaced through the `Crate`/`CrateParentList`/
//! `CrateHierarchy`/`CrateTrackList` views with INSTEAD-OF triggers, per
//! [`crate::schema::ddl::v1_mature`]. Operations here issue plain
//! INSERT/DELETE against those views and rely on the triggers to keep the
//! underlying `List`/`ListParentList`/`ListHierarchy`/`ListTrackList` rows
//! consistent, per spec's explicit permission to do so.

use futures_util::stream::BoxStream;
use sqlx::{FromRow, SqliteConnection, SqliteExecutor};

use crate::error::validate_name;
use crate::{Error, Result, TrackId};

crate::db_id!(CrateId);

#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct Crate {
    pub id: CrateId,
    pub title: Option<String>,
    pub path: Option<String>,
}

impl Crate {
    /// Fetches all [`Crate`]s asynchronously.
    ///
    /// Unfiltered and in no particular order.
    #[must_use]
    pub fn fetch_all<'a>(executor: impl SqliteExecutor<'a> + 'a) -> BoxStream<'a, sqlx::Result<Crate>> {
        sqlx::query_as(r"SELECT * FROM Crate").fetch(executor)
    }

    /// Loads a single [`Crate`] by ID.
    ///
    /// Returns `Ok(None)` if the requested [`Crate`] has not been found.
    pub async fn try_load(executor: impl SqliteExecutor<'_>, id: CrateId) -> sqlx::Result<Option<Crate>> {
        sqlx::query_as(r"SELECT * FROM Crate WHERE id=?1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Finds the [`CrateId`] of the crate whose `path` column exactly
    /// matches `path`, if any.
    pub async fn find_id_by_path(executor: impl SqliteExecutor<'_>, path: &str) -> sqlx::Result<Option<CrateId>> {
        sqlx::query_scalar(r"SELECT id FROM Crate WHERE path=?1")
            .bind(path)
            .fetch_optional(executor)
            .await
    }

    fn validate_title(title: &str) -> Result<()> {
        if !validate_name(title) {
            return Err(Error::CrateInvalidName {
                name: title.to_owned(),
            });
        }
        Ok(())
    }

    /// Creates a new crate with no parent, at top-level path `title;`.
    pub async fn create_root(conn: &mut SqliteConnection, title: &str) -> Result<CrateId> {
        Self::validate_title(title)?;
        let path = crate::concat_playlist_path_segments_to_string([title]);
        Self::insert(conn, title, &path).await
    }

    /// Creates a new crate nested under `parent_id`, at path
    /// `<parent path><title>;`.
    pub async fn create_child(conn: &mut SqliteConnection, title: &str, parent_id: CrateId) -> Result<CrateId> {
        Self::validate_title(title)?;
        let Some(parent) = Self::try_load(&mut *conn, parent_id).await.map_err(Error::Sqlx)? else {
            return Err(Error::CrateInvalidParent);
        };
        let path = format!("{}{title}{}", parent.path.unwrap_or_default(), crate::PLAYLIST_PATH_SEGMENT_SEPARATOR);
        let id = Self::insert(&mut *conn, title, &path).await?;
        sqlx::query(r"INSERT INTO CrateParentList (crateOriginId, crateParentId) VALUES (?1, ?2)")
            .bind(id)
            .bind(parent_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        sqlx::query(r"INSERT INTO CrateHierarchy (crateId, crateIdChild) VALUES (?1, ?2)")
            .bind(parent_id)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        Ok(id)
    }

    async fn insert(conn: &mut SqliteConnection, title: &str, path: &str) -> Result<CrateId> {
        let next_id: CrateId = sqlx::query_scalar(r"SELECT COALESCE(MAX(id), 0) + 1 FROM List")
            .fetch_one(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        sqlx::query(r"INSERT INTO Crate (id, title, path) VALUES (?1, ?2, ?3)")
            .bind(next_id)
            .bind(title)
            .bind(path)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        Ok(next_id)
    }

    /// The immediate parent of `id`, or `None` for a root crate.
    pub async fn parent(executor: impl SqliteExecutor<'_>, id: CrateId) -> sqlx::Result<Option<CrateId>> {
        sqlx::query_scalar(r"SELECT crateParentId FROM CrateParentList WHERE crateOriginId=?1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// The immediate children of `id`, unordered.
    pub fn children(executor: impl SqliteExecutor<'_> + '_, id: CrateId) -> BoxStream<'_, sqlx::Result<CrateId>> {
        sqlx::query_scalar(r"SELECT crateOriginId FROM CrateParentList WHERE crateParentId=?1")
            .bind(id)
            .fetch(executor)
    }

    /// Adds `track_id` to this crate's membership.
    pub async fn add_track(conn: &mut SqliteConnection, id: CrateId, track_id: TrackId) -> Result<()> {
        sqlx::query(r"INSERT INTO CrateTrackList (crateId, trackId) VALUES (?1, ?2)")
            .bind(id)
            .bind(track_id)
            .execute(conn)
            .await
            .map_err(Error::Sqlx)?;
        Ok(())
    }

    /// The tracks in this crate's membership, unordered.
    pub fn tracks(executor: impl SqliteExecutor<'_> + '_, id: CrateId) -> BoxStream<'_, sqlx::Result<TrackId>> {
        sqlx::query_scalar(r"SELECT trackId FROM CrateTrackList WHERE crateId=?1")
            .bind(id)
            .fetch(executor)
    }

    /// Removes `id` and every descendant crate, cascading through
    /// `CrateHierarchy`/`CrateParentList`/`CrateTrackList` by hand rather
    /// than relying on SQLite foreign-key cascades (`PRAGMA foreign_keys`
    /// is left at its default off).
    pub async fn remove(conn: &mut SqliteConnection, id: CrateId) -> Result<bool> {
        if Self::try_load(&mut *conn, id).await.map_err(Error::Sqlx)?.is_none() {
            return Ok(false);
        }
        let mut stack = vec![id];
        let mut doomed = Vec::new();
        while let Some(current) = stack.pop() {
            doomed.push(current);
            let children: Vec<CrateId> = sqlx::query_scalar(r"SELECT crateIdChild FROM CrateHierarchy WHERE crateId=?1")
                .bind(current)
                .fetch_all(&mut *conn)
                .await
                .map_err(Error::Sqlx)?;
            stack.extend(children);
        }
        for doomed_id in &doomed {
            sqlx::query(r"DELETE FROM CrateTrackList WHERE crateId=?1")
                .bind(doomed_id)
                .execute(&mut *conn)
                .await
                .map_err(Error::Sqlx)?;
            sqlx::query(r"DELETE FROM CrateHierarchy WHERE crateId=?1 OR crateIdChild=?1")
                .bind(doomed_id)
                .execute(&mut *conn)
                .await
                .map_err(Error::Sqlx)?;
            sqlx::query(r"DELETE FROM CrateParentList WHERE crateOriginId=?1 OR crateParentId=?1")
                .bind(doomed_id)
                .execute(&mut *conn)
                .await
                .map_err(Error::Sqlx)?;
            sqlx::query(r"DELETE FROM Crate WHERE id=?1")
                .bind(doomed_id)
                .execute(&mut *conn)
                .await
                .map_err(Error::Sqlx)?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::{Connection as _, SqliteConnection};

    use super::Crate;
    use crate::schema::SchemaCreatorValidator as _;
    use crate::version::SchemaVariant;

    async fn v1_conn() -> SqliteConnection {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        SchemaVariant::V1_17_0.creator_validator().create(&mut conn).await.unwrap();
        conn
    }

    #[tokio::test]
    async fn create_root_then_find_by_path() {
        let mut conn = v1_conn().await;
        let id = Crate::create_root(&mut conn, "A").await.unwrap();
        assert_eq!(Crate::find_id_by_path(&mut conn, "A;").await.unwrap(), Some(id));
    }

    #[tokio::test]
    async fn rejects_invalid_name() {
        let mut conn = v1_conn().await;
        assert!(Crate::create_root(&mut conn, "bad;name").await.is_err());
        assert!(Crate::create_root(&mut conn, "").await.is_err());
    }

    #[tokio::test]
    async fn remove_cascades_to_descendants() {
        // Mirrors the worked scenario: create crate "A", sub-crate "A/B",
        // remove "A"; both should be gone.
        let mut conn = v1_conn().await;
        let a = Crate::create_root(&mut conn, "A").await.unwrap();
        let b = Crate::create_child(&mut conn, "B", a).await.unwrap();
        assert!(Crate::remove(&mut conn, a).await.unwrap());
        assert!(Crate::try_load(&mut conn, a).await.unwrap().is_none());
        assert!(Crate::try_load(&mut conn, b).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn add_track_reports_in_membership() {
        use futures_util::TryStreamExt as _;

        let mut conn = v1_conn().await;
        let crate_id = Crate::create_root(&mut conn, "A").await.unwrap();
        sqlx::query(
            r#"INSERT INTO Track (id, isPlayed, isAnalyzed, isAvailable, isMetadataOfPackedTrackChanged,
                isPerfomanceDataOfPackedTrackChanged, isMetadataImported, isBeatGridLocked, streamingFlags,
                explicitLyrics, lastEditTime)
               VALUES (1, 0, 0, 0, 0, 0, 0, 0, 0, 0, '2024-01-01T00:00:00Z')"#,
        )
        .execute(&mut conn)
        .await
        .unwrap();
        let track_id: crate::TrackId = sqlx::query_scalar("SELECT id FROM Track").fetch_one(&mut conn).await.unwrap();
        Crate::add_track(&mut conn, crate_id, track_id).await.unwrap();
        let tracks: Vec<crate::TrackId> = Crate::tracks(&mut conn, crate_id).try_collect().await.unwrap();
        assert_eq!(tracks, vec![track_id]);
    }
}
