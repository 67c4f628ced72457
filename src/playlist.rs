// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use std::collections::HashSet;

use futures_util::stream::BoxStream;
use sqlx::{FromRow, SqliteConnection, SqliteExecutor, types::time::OffsetDateTime};

use crate::error::validate_name;
use crate::{DbUuid, Entity, Error, Result, TrackId};

/// Separator between segments of a `List.path`/[`PlaylistPath`] value,
/// matching the literal `title || ";"` built by the `trigger_insert_*`
/// triggers in [`crate::schema::ddl`].
pub const PLAYLIST_PATH_SEGMENT_SEPARATOR: char = ';';

/// Whether `segment` is usable as one playlist/crate path segment: non-empty
/// and free of [`PLAYLIST_PATH_SEGMENT_SEPARATOR`].
///
/// Also the contract behind `playlist_invalid_name`/`crate_invalid_name`,
/// via [`crate::error::validate_name`].
#[must_use]
pub fn is_valid_playlist_path_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(PLAYLIST_PATH_SEGMENT_SEPARATOR)
}

/// Joins path segments into the `;`-terminated form stored in `List.path`
/// and `PlaylistPath.path`.
#[must_use]
pub fn concat_playlist_path_segments_to_string<'a>(
    segments: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push_str(segment);
        path.push(PLAYLIST_PATH_SEGMENT_SEPARATOR);
    }
    path
}

crate::db_id!(PlaylistId);

#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct Playlist {
    pub id: PlaylistId,
    pub title: String,
    pub parent_list_id: PlaylistId,
    pub is_persisted: bool,
    pub next_list_id: PlaylistId,
    pub last_edit_time: OffsetDateTime,
    pub is_explicitly_exported: bool,
}

impl Playlist {
    /// Fetches all [`Playlist`]s asynchronously.
    ///
    /// Unfiltered and in no particular order.
    #[must_use]
    pub fn fetch_all<'a>(
        executor: impl SqliteExecutor<'a> + 'a,
    ) -> BoxStream<'a, sqlx::Result<Playlist>> {
        sqlx::query_as(r"SELECT * FROM Playlist").fetch(executor)
    }

    /// Loads a single [`Playlist`]s by ID.
    ///
    /// Returns `Ok(None)` if the requested [`Playlist`]s has not been found.
    pub async fn try_load(
        executor: impl SqliteExecutor<'_>,
        id: PlaylistId,
    ) -> sqlx::Result<Option<Playlist>> {
        sqlx::query_as(r"SELECT * FROM Playlist WHERE id=?1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Loads every sibling under `parent_list_id`, in chain order starting
    /// from the head: the one sibling no other sibling's `nextListId`
    /// points to.
    ///
    /// Fails with [`Error::DatabaseInconsistency`] if the chain is broken
    /// (a dangling `nextListId`, or a cycle that leaves siblings unvisited).
    pub async fn siblings_in_order(
        executor: impl SqliteExecutor<'_>,
        parent_list_id: PlaylistId,
    ) -> Result<Vec<Playlist>> {
        let rows: Vec<Playlist> = sqlx::query_as(r"SELECT * FROM Playlist WHERE parentListId=?1")
            .bind(parent_list_id)
            .fetch_all(executor)
            .await
            .map_err(Error::Sqlx)?;
        let by_id: std::collections::HashMap<PlaylistId, Playlist> =
            rows.iter().cloned().map(|row| (row.id, row)).collect();
        let pointed_to: HashSet<PlaylistId> = rows
            .iter()
            .map(|row| row.next_list_id)
            .filter(|id| id.is_valid())
            .collect();
        let Some(head) = rows.iter().find(|row| !pointed_to.contains(&row.id)) else {
            return Ok(Vec::new());
        };
        let mut ordered = Vec::with_capacity(rows.len());
        let mut current = head.clone();
        loop {
            let next_id = current.next_list_id;
            ordered.push(current);
            if !next_id.is_valid() {
                break;
            }
            let Some(next) = by_id.get(&next_id) else {
                return Err(Error::DatabaseInconsistency {
                    message: format!(
                        "playlist chain under parent {parent_list_id} references missing sibling {next_id}"
                    ),
                });
            };
            current = next.clone();
        }
        if ordered.len() != rows.len() {
            return Err(Error::DatabaseInconsistency {
                message: format!(
                    "playlist chain under parent {parent_list_id} visited {visited} of {total} siblings",
                    visited = ordered.len(),
                    total = rows.len()
                ),
            });
        }
        Ok(ordered)
    }

    async fn validate_new(conn: &mut SqliteConnection, title: &str, parent_list_id: PlaylistId) -> Result<()> {
        if !validate_name(title) {
            return Err(Error::PlaylistInvalidName {
                name: title.to_owned(),
            });
        }
        if parent_list_id != PlaylistId::INVALID_ZERO
            && Self::try_load(&mut *conn, parent_list_id).await.map_err(Error::Sqlx)?.is_none()
        {
            return Err(Error::PlaylistInvalidParent);
        }
        Ok(())
    }

    /// Inserts a new playlist as the last sibling under `parent_list_id`.
    ///
    /// Validates `title` and `parent_list_id` before issuing any SQL, per
    /// `playlist_invalid_name`/`playlist_invalid_parent`.
    pub async fn add_back(
        conn: &mut SqliteConnection,
        title: &str,
        parent_list_id: PlaylistId,
    ) -> Result<PlaylistId> {
        Self::validate_new(conn, title, parent_list_id).await?;
        let siblings = Self::siblings_in_order(&mut *conn, parent_list_id).await?;
        // Free the existing tail's `(parentListId, 0)` slot before the
        // INSERT below claims it, so the pair is never live on two rows at
        // once under the non-deferrable UNIQUE constraint.
        if let Some(tail) = siblings.last() {
            sqlx::query(r"UPDATE Playlist SET nextListId=?1 WHERE id=?2")
                .bind(PlaylistId::INVALID_MIN_EXCLUSIVE)
                .bind(tail.id)
                .execute(&mut *conn)
                .await
                .map_err(Error::Sqlx)?;
        }
        let new_id: PlaylistId = sqlx::query_scalar(
            r"INSERT INTO Playlist
                 (title, parentListId, isPersisted, nextListId, lastEditTime, isExplicitlyExported)
              VALUES (?1, ?2, 1, 0, ?3, 1)
              RETURNING id",
        )
        .bind(title)
        .bind(parent_list_id)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut *conn)
        .await
        .map_err(Error::Sqlx)?;
        if let Some(tail) = siblings.last() {
            sqlx::query(r"UPDATE Playlist SET nextListId=?1 WHERE id=?2")
                .bind(new_id)
                .bind(tail.id)
                .execute(&mut *conn)
                .await
                .map_err(Error::Sqlx)?;
        }
        Ok(new_id)
    }

    /// Inserts a new playlist as the first sibling under `parent_list_id`.
    pub async fn add_front(
        conn: &mut SqliteConnection,
        title: &str,
        parent_list_id: PlaylistId,
    ) -> Result<PlaylistId> {
        Self::validate_new(conn, title, parent_list_id).await?;
        let siblings = Self::siblings_in_order(&mut *conn, parent_list_id).await?;
        let head_next = siblings
            .first()
            .map_or(PlaylistId::INVALID_ZERO, |head| head.id);
        let new_id: PlaylistId = sqlx::query_scalar(
            r"INSERT INTO Playlist
                 (title, parentListId, isPersisted, nextListId, lastEditTime, isExplicitlyExported)
              VALUES (?1, ?2, 1, ?3, ?4, 1)
              RETURNING id",
        )
        .bind(title)
        .bind(parent_list_id)
        .bind(head_next)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut *conn)
        .await
        .map_err(Error::Sqlx)?;
        Ok(new_id)
    }

    /// Inserts a new playlist immediately after `after_id`, under the same
    /// parent as `after_id`.
    pub async fn add_after(conn: &mut SqliteConnection, title: &str, after_id: PlaylistId) -> Result<PlaylistId> {
        let Some(after) = Self::try_load(&mut *conn, after_id).await.map_err(Error::Sqlx)? else {
            return Err(Error::PlaylistInvalidParent);
        };
        Self::validate_new(conn, title, after.parent_list_id).await?;
        // Free `after`'s own `(parentListId, nextListId)` slot before the
        // INSERT below duplicates it onto the new row.
        sqlx::query(r"UPDATE Playlist SET nextListId=?1 WHERE id=?2")
            .bind(PlaylistId::INVALID_MIN_EXCLUSIVE)
            .bind(after_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        let new_id: PlaylistId = sqlx::query_scalar(
            r"INSERT INTO Playlist
                 (title, parentListId, isPersisted, nextListId, lastEditTime, isExplicitlyExported)
              VALUES (?1, ?2, 1, ?3, ?4, 1)
              RETURNING id",
        )
        .bind(title)
        .bind(after.parent_list_id)
        .bind(after.next_list_id)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut *conn)
        .await
        .map_err(Error::Sqlx)?;
        sqlx::query(r"UPDATE Playlist SET nextListId=?1 WHERE id=?2")
            .bind(new_id)
            .bind(after_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        Ok(new_id)
    }

    /// Moves an existing playlist to immediately after `after_id`,
    /// reparenting it if `after_id` belongs to a different parent.
    pub async fn reparent_after(conn: &mut SqliteConnection, id: PlaylistId, after_id: PlaylistId) -> Result<()> {
        let Some(moved) = Self::try_load(&mut *conn, id).await.map_err(Error::Sqlx)? else {
            return Err(Error::RowIdError {
                entity: Entity::Playlist,
                message: format!("no playlist with id {id}"),
            });
        };
        // Unlink `id` from its current chain: whoever pointed to it now
        // points to what it used to point to. If nothing pointed to it
        // (it was the head), this touches no rows.
        sqlx::query(r"UPDATE Playlist SET nextListId=?1 WHERE parentListId=?2 AND nextListId=?3")
            .bind(moved.next_list_id)
            .bind(moved.parent_list_id)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        // Re-fetch `after` now, not before the unlink: if `after_id` was
        // `id`'s own predecessor, the unlink above just changed its
        // `nextListId`, and splicing against a stale snapshot would recreate
        // the duplicate pair this whole sequence exists to avoid.
        let Some(after) = Self::try_load(&mut *conn, after_id).await.map_err(Error::Sqlx)? else {
            return Err(Error::PlaylistInvalidParent);
        };
        if after.id == id {
            return Err(Error::PlaylistInvalidParent);
        }
        // Free `after`'s own `(parentListId, nextListId)` slot before moving
        // `id` into it.
        sqlx::query(r"UPDATE Playlist SET nextListId=?1 WHERE id=?2")
            .bind(PlaylistId::INVALID_MIN_EXCLUSIVE)
            .bind(after_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        // Splice `id` into `after_id`'s chain, immediately after it.
        sqlx::query(r"UPDATE Playlist SET parentListId=?1, nextListId=?2 WHERE id=?3")
            .bind(after.parent_list_id)
            .bind(after.next_list_id)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        sqlx::query(r"UPDATE Playlist SET nextListId=?1 WHERE id=?2")
            .bind(id)
            .bind(after_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        Ok(())
    }

    /// Removes a playlist, splicing its sibling chain back together.
    ///
    /// Returns `false` if no such playlist exists.
    pub async fn remove(conn: &mut SqliteConnection, id: PlaylistId) -> Result<bool> {
        let Some(row) = Self::try_load(&mut *conn, id).await.map_err(Error::Sqlx)? else {
            return Ok(false);
        };
        // Delete the target row before repointing its predecessor: until
        // it's gone, `row`'s own `(parentListId, nextListId)` tuple is
        // identical to the tuple the predecessor update below would write,
        // and the UNIQUE constraint isn't deferrable.
        let result = sqlx::query(r"DELETE FROM Playlist WHERE id=?1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        sqlx::query(r"UPDATE Playlist SET nextListId=?1 WHERE parentListId=?2 AND nextListId=?3")
            .bind(row.next_list_id)
            .bind(row.parent_list_id)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        Ok(result.rows_affected() == 1)
    }
}

crate::db_id!(PlaylistEntityId);

#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct PlaylistEntity {
    pub id: PlaylistEntityId,
    pub list_id: PlaylistId,
    pub track_id: TrackId,
    pub database_uuid: DbUuid,
    pub next_entity_id: PlaylistEntityId,
    pub membership_reference: i64,
}

impl PlaylistEntity {
    /// Fetches all [`PlaylistEntity`]s asynchronously.
    ///
    /// Unfiltered and in no particular order.
    #[must_use]
    pub fn fetch_all<'a>(
        executor: impl SqliteExecutor<'a> + 'a,
    ) -> BoxStream<'a, sqlx::Result<PlaylistEntity>> {
        sqlx::query_as(r"SELECT * FROM PlaylistEntity").fetch(executor)
    }

    /// Loads a single [`PlaylistEntity`]s by ID.
    ///
    /// Returns `Ok(None)` if the requested [`PlaylistEntity`]s has not been found.
    pub async fn try_load(
        executor: impl SqliteExecutor<'_>,
        id: PlaylistEntityId,
    ) -> sqlx::Result<Option<PlaylistEntity>> {
        sqlx::query_as(r"SELECT * FROM PlaylistEntity WHERE id=?1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Loads every membership row under `list_id`, in chain order starting
    /// from the head, mirroring [`Playlist::siblings_in_order`] but keyed
    /// on `nextEntityId` instead of `nextListId`.
    pub async fn entries_in_order(
        executor: impl SqliteExecutor<'_>,
        list_id: PlaylistId,
    ) -> Result<Vec<PlaylistEntity>> {
        let rows: Vec<PlaylistEntity> = sqlx::query_as(r"SELECT * FROM PlaylistEntity WHERE listId=?1")
            .bind(list_id)
            .fetch_all(executor)
            .await
            .map_err(Error::Sqlx)?;
        let by_id: std::collections::HashMap<PlaylistEntityId, PlaylistEntity> =
            rows.iter().cloned().map(|row| (row.id, row)).collect();
        let pointed_to: HashSet<PlaylistEntityId> = rows
            .iter()
            .map(|row| row.next_entity_id)
            .filter(|id| id.is_valid())
            .collect();
        let Some(head) = rows.iter().find(|row| !pointed_to.contains(&row.id)) else {
            return Ok(Vec::new());
        };
        let mut ordered = Vec::with_capacity(rows.len());
        let mut current = head.clone();
        loop {
            let next_id = current.next_entity_id;
            ordered.push(current);
            if !next_id.is_valid() {
                break;
            }
            let Some(next) = by_id.get(&next_id) else {
                return Err(Error::DatabaseInconsistency {
                    message: format!(
                        "playlist entity chain under list {list_id} references missing entry {next_id}"
                    ),
                });
            };
            current = next.clone();
        }
        if ordered.len() != rows.len() {
            return Err(Error::DatabaseInconsistency {
                message: format!(
                    "playlist entity chain under list {list_id} visited {visited} of {total} entries",
                    visited = ordered.len(),
                    total = rows.len()
                ),
            });
        }
        Ok(ordered)
    }

    /// Appends `track_id` as the last entry of `list_id`'s membership chain.
    pub async fn add_back(
        conn: &mut SqliteConnection,
        list_id: PlaylistId,
        track_id: TrackId,
        database_uuid: DbUuid,
        membership_reference: i64,
    ) -> Result<PlaylistEntityId> {
        let entries = Self::entries_in_order(&mut *conn, list_id).await?;
        let new_id: PlaylistEntityId = sqlx::query_scalar(
            r"INSERT INTO PlaylistEntity (listId, trackId, databaseUuid, nextEntityId, membershipReference)
              VALUES (?1, ?2, ?3, 0, ?4)
              RETURNING id",
        )
        .bind(list_id)
        .bind(track_id)
        .bind(database_uuid)
        .bind(membership_reference)
        .fetch_one(&mut *conn)
        .await
        .map_err(Error::Sqlx)?;
        if let Some(tail) = entries.last() {
            sqlx::query(r"UPDATE PlaylistEntity SET nextEntityId=?1 WHERE id=?2")
                .bind(new_id)
                .bind(tail.id)
                .execute(&mut *conn)
                .await
                .map_err(Error::Sqlx)?;
        }
        Ok(new_id)
    }

    /// Removes a membership entry, splicing its chain back together.
    ///
    /// Returns `false` if no such entry exists.
    pub async fn remove(conn: &mut SqliteConnection, id: PlaylistEntityId) -> Result<bool> {
        let Some(row) = Self::try_load(&mut *conn, id).await.map_err(Error::Sqlx)? else {
            return Ok(false);
        };
        sqlx::query(r"UPDATE PlaylistEntity SET nextEntityId=?1 WHERE listId=?2 AND nextEntityId=?3")
            .bind(row.next_entity_id)
            .bind(row.list_id)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        let result = sqlx::query(r"DELETE FROM PlaylistEntity WHERE id=?1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        Ok(result.rows_affected() == 1)
    }
}

crate::db_id!(PlaylistAllChildrenId);

#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct PlaylistAllChildren {
    pub id: PlaylistAllChildrenId,
    pub child_list_id: PlaylistId,
}

crate::db_id!(PlaylistAllParentId);

#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct PlaylistAllParent {
    pub id: PlaylistAllParentId,
    pub parent_list_id: PlaylistId,
}

crate::db_id!(PlaylistPathId);

#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct PlaylistPath {
    pub id: i64,
    pub path: String,
    pub position: i64,
}

#[cfg(test)]
mod tests {
    use sqlx::Connection;
    use sqlx::SqliteConnection;

    use super::{Playlist, PlaylistEntity, PlaylistEntityId, PlaylistId, is_valid_playlist_path_segment};
    use crate::schema::SchemaCreatorValidator as _;
    use crate::version::SchemaVariant;
    use crate::{DbUuid, TrackId};

    async fn insert_track(conn: &mut SqliteConnection) -> TrackId {
        sqlx::query_scalar(
            r#"INSERT INTO Track (isPlayed, isAnalyzed, isAvailable, isMetadataOfPackedTrackChanged,
                isPerfomanceDataOfPackedTrackChanged, isMetadataImported, isBeatGridLocked, streamingFlags,
                explicitLyrics, lastEditTime)
               VALUES (0, 0, 0, 0, 0, 0, 0, 0, 0, '2024-01-01T00:00:00Z')
               RETURNING id"#,
        )
        .fetch_one(conn)
        .await
        .unwrap()
    }

    async fn unified_conn() -> SqliteConnection {
        variant_conn(SchemaVariant::V3_1_0).await
    }

    async fn variant_conn(variant: SchemaVariant) -> SqliteConnection {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        variant.creator_validator().create(&mut conn).await.unwrap();
        conn
    }

    #[test]
    fn rejects_empty_and_separator_containing_segments() {
        assert!(!is_valid_playlist_path_segment(""));
        assert!(!is_valid_playlist_path_segment("a;b"));
        assert!(is_valid_playlist_path_segment("a"));
    }

    #[tokio::test]
    async fn add_back_appends_in_order() {
        let mut conn = unified_conn().await;
        let root = PlaylistId::INVALID_ZERO;
        let a = Playlist::add_back(&mut conn, "A", root).await.unwrap();
        let b = Playlist::add_back(&mut conn, "B", root).await.unwrap();
        let c = Playlist::add_back(&mut conn, "C", root).await.unwrap();
        let order: Vec<PlaylistId> = Playlist::siblings_in_order(&mut conn, root)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[tokio::test]
    async fn add_front_prepends() {
        let mut conn = unified_conn().await;
        let root = PlaylistId::INVALID_ZERO;
        let a = Playlist::add_back(&mut conn, "A", root).await.unwrap();
        let z = Playlist::add_front(&mut conn, "Z", root).await.unwrap();
        let order: Vec<PlaylistId> = Playlist::siblings_in_order(&mut conn, root)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(order, vec![z, a]);
    }

    #[tokio::test]
    async fn reparent_after_reorders_chain() {
        // Mirrors the worked scenario: create at 2.20.3, add four root
        // playlists A, B, C, D, reparent C to after A, expect A, C, B, D.
        let mut conn = variant_conn(SchemaVariant::V2_20_3).await;
        let root = PlaylistId::INVALID_ZERO;
        let a = Playlist::add_back(&mut conn, "A", root).await.unwrap();
        let b = Playlist::add_back(&mut conn, "B", root).await.unwrap();
        let c = Playlist::add_back(&mut conn, "C", root).await.unwrap();
        let d = Playlist::add_back(&mut conn, "D", root).await.unwrap();
        Playlist::reparent_after(&mut conn, c, a).await.unwrap();
        let order: Vec<PlaylistId> = Playlist::siblings_in_order(&mut conn, root)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(order, vec![a, c, b, d]);
    }

    #[tokio::test]
    async fn remove_splices_chain() {
        let mut conn = unified_conn().await;
        let root = PlaylistId::INVALID_ZERO;
        let a = Playlist::add_back(&mut conn, "A", root).await.unwrap();
        let b = Playlist::add_back(&mut conn, "B", root).await.unwrap();
        let c = Playlist::add_back(&mut conn, "C", root).await.unwrap();
        assert!(Playlist::remove(&mut conn, b).await.unwrap());
        let order: Vec<PlaylistId> = Playlist::siblings_in_order(&mut conn, root)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(order, vec![a, c]);
    }

    #[tokio::test]
    async fn rejects_invalid_name_before_touching_sql() {
        let mut conn = unified_conn().await;
        let root = PlaylistId::INVALID_ZERO;
        let result = Playlist::add_back(&mut conn, "a;b", root).await;
        assert!(result.is_err());
        assert!(Playlist::siblings_in_order(&mut conn, root).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn playlist_entity_add_back_appends_in_order() {
        let mut conn = unified_conn().await;
        let root = PlaylistId::INVALID_ZERO;
        let list_id = Playlist::add_back(&mut conn, "A", root).await.unwrap();
        let track1 = insert_track(&mut conn).await;
        let track2 = insert_track(&mut conn).await;
        let first = PlaylistEntity::add_back(&mut conn, list_id, track1, DbUuid::nil(), 0)
            .await
            .unwrap();
        let second = PlaylistEntity::add_back(&mut conn, list_id, track2, DbUuid::nil(), 0)
            .await
            .unwrap();
        let order: Vec<PlaylistEntityId> = PlaylistEntity::entries_in_order(&mut conn, list_id)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(order, vec![first, second]);
    }

    #[tokio::test]
    async fn playlist_entity_remove_splices_chain() {
        let mut conn = unified_conn().await;
        let root = PlaylistId::INVALID_ZERO;
        let list_id = Playlist::add_back(&mut conn, "A", root).await.unwrap();
        let track1 = insert_track(&mut conn).await;
        let track2 = insert_track(&mut conn).await;
        let track3 = insert_track(&mut conn).await;
        let first = PlaylistEntity::add_back(&mut conn, list_id, track1, DbUuid::nil(), 0)
            .await
            .unwrap();
        let second = PlaylistEntity::add_back(&mut conn, list_id, track2, DbUuid::nil(), 0)
            .await
            .unwrap();
        let third = PlaylistEntity::add_back(&mut conn, list_id, track3, DbUuid::nil(), 0)
            .await
            .unwrap();
        assert!(PlaylistEntity::remove(&mut conn, second).await.unwrap());
        let order: Vec<PlaylistEntityId> = PlaylistEntity::entries_in_order(&mut conn, list_id)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(order, vec![first, third]);
    }
}
