// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use futures_util::stream::BoxStream;
use sqlx::{FromRow, SqlitePool, types::Uuid};

use crate::DbUuid;
use crate::version::SchemaVersion;
use crate::{Entity, Error, Result};

crate::db_id!(InformationId);

/// Database information.
#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct Information {
    id: InformationId,
    uuid: DbUuid,
    schema_version_major: i64,
    schema_version_minor: i64,
    schema_version_patch: i64,
    current_played_indicator: Option<i64>,
    #[expect(dead_code)]
    last_rekord_box_library_import_read_counter: Option<i64>,
}

impl Information {
    #[must_use]
    pub const fn id(&self) -> InformationId {
        self.id
    }

    #[must_use]
    pub const fn uuid(&self) -> &Uuid {
        self.uuid.as_uuid()
    }

    /// The random sentinel written on the `2.x`/`3.x` variants (`§9`'s open
    /// question); hard-coded verbatim for `v1`.
    #[must_use]
    pub const fn current_played_indicator(&self) -> Option<i64> {
        self.current_played_indicator
    }

    /// Gets the schema version.
    ///
    /// # Panics
    ///
    /// Panics if any of the version numbers is negative or exceeds the maximum value.
    #[must_use]
    pub fn schema_version(&self) -> SchemaVersion {
        let major = self
            .schema_version_major
            .try_into()
            .expect("valid major number");
        let minor = self
            .schema_version_minor
            .try_into()
            .expect("valid minor number");
        let patch = self
            .schema_version_patch
            .try_into()
            .expect("valid patch number");
        SchemaVersion {
            major,
            minor,
            patch,
        }
    }
}

/// Fetches all information asynchronously.
///
/// Unfiltered and in no particular order.
#[must_use]
pub fn information_fetch_all(pool: &SqlitePool) -> BoxStream<'_, sqlx::Result<Information>> {
    sqlx::query_as(r"SELECT * FROM Information").fetch(pool)
}

/// Loads a single information by id.
///
/// Returns `Ok(None)` if the requested information has not been found.
pub async fn information_try_load(
    pool: &SqlitePool,
    id: InformationId,
) -> sqlx::Result<Option<Information>> {
    sqlx::query_as(r"SELECT * FROM Information WHERE id=?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Loads a single information by database UUID.
///
/// Returns `Ok(None)` if the requested information has not been found.
pub async fn information_try_load_by_uuid(
    pool: &SqlitePool,
    uuid: &DbUuid,
) -> sqlx::Result<Option<Information>> {
    sqlx::query_as(r"SELECT * FROM Information WHERE uuid=?1")
        .bind(uuid)
        .fetch_optional(pool)
        .await
}

/// Loads every information row.
///
/// Unfiltered and in no particular order.
pub async fn information_load_all(pool: &SqlitePool) -> sqlx::Result<Vec<Information>> {
    use futures_util::TryStreamExt;
    information_fetch_all(pool).try_collect().await
}

/// Sets `currentPlayedIndicator` on the singleton information row.
///
/// `Information` is created once, at schema-creation time (see
/// `crate::schema`'s `insert_information_row`); this is a field-level
/// setter rather than full CRUD because the row itself is never
/// inserted/removed through the public API.
pub async fn information_set_current_played_indicator(
    pool: &SqlitePool,
    id: InformationId,
    current_played_indicator: Option<i64>,
) -> Result<()> {
    let result = sqlx::query(r"UPDATE Information SET currentPlayedIndiciator=?1 WHERE id=?2")
        .bind(current_played_indicator)
        .bind(id)
        .execute(pool)
        .await
        .map_err(Error::Sqlx)?;
    if result.rows_affected() == 0 {
        return Err(Error::RowIdError {
            entity: Entity::Information,
            message: format!("no information row with id {id}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlx::SqlitePool;

    use super::{Information, information_load_all, information_set_current_played_indicator};
    use crate::schema::SchemaCreatorValidator as _;
    use crate::version::SchemaVariant;

    async fn unified_pool() -> SqlitePool {
        use sqlx::sqlite::SqlitePoolOptions;
        // A single pooled connection, so the in-memory database created below
        // is the same one every later `&pool`-based query sees.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let mut conn = pool.acquire().await.unwrap();
        SchemaVariant::V3_1_0.creator_validator().create(&mut conn).await.unwrap();
        drop(conn);
        pool
    }

    #[tokio::test]
    async fn set_current_played_indicator_round_trips() {
        let pool = unified_pool().await;
        let rows: Vec<Information> = information_load_all(&pool).await.unwrap();
        let id = rows[0].id();
        information_set_current_played_indicator(&pool, id, Some(42)).await.unwrap();
        let rows: Vec<Information> = information_load_all(&pool).await.unwrap();
        assert_eq!(rows[0].current_played_indicator(), Some(42));
    }
}

