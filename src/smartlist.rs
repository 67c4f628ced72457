// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor, types::Json, types::time::OffsetDateTime};

use crate::{Entity, Error, Result};

crate::db_uuid!(SmartlistUuid);

#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct Smartlist {
    pub list_uuid: SmartlistUuid,
    pub title: String,
    pub parent_playlist_path: String,
    pub next_playlist_path: String,
    pub next_list_uuid: SmartlistUuid,
    #[sqlx(json)]
    pub rules: SmartlistRules,
    pub last_edit_time: OffsetDateTime,
}

impl Smartlist {
    /// Checks if the table is available in the database.
    pub async fn is_available<'a>(executor: impl SqliteExecutor<'a> + 'a) -> sqlx::Result<bool> {
        let (exists,) = sqlx::query_as(
            r"SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='Smartlist')",
        )
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Fetches all [`Smartlist`]s asynchronously.
    ///
    /// Unfiltered and in no particular order.
    #[must_use]
    pub fn fetch_all<'a>(
        executor: impl SqliteExecutor<'a> + 'a,
    ) -> BoxStream<'a, sqlx::Result<Self>> {
        sqlx::query_as(r"SELECT * FROM Smartlist").fetch(executor)
    }

    /// Loads a single [`Smartlist`] by UUID.
    ///
    /// Returns `Ok(None)` if the requested [`Smartlist`] has not been found.
    pub async fn try_load(
        executor: impl SqliteExecutor<'_>,
        list_uuid: &SmartlistUuid,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as(r"SELECT * FROM Smartlist WHERE listUuid=?1")
            .bind(list_uuid)
            .fetch_optional(executor)
            .await
    }

    /// Creates a new smartlist at the top of `parent_playlist_path`'s
    /// sibling chain, generating a fresh `listUuid`.
    pub async fn add(
        executor: impl SqliteExecutor<'_>,
        title: &str,
        parent_playlist_path: &str,
        rules: &SmartlistRules,
    ) -> Result<SmartlistUuid> {
        let list_uuid = SmartlistUuid::from_uuid(uuid::Uuid::new_v4());
        sqlx::query(
            r"INSERT INTO Smartlist
                (listUuid, title, parentPlaylistPath, nextPlaylistPath, nextListUuid, rules, lastEditTime)
              VALUES (?1, ?2, ?3, '', ?4, ?5, ?6)",
        )
        .bind(list_uuid)
        .bind(title)
        .bind(parent_playlist_path)
        .bind(SmartlistUuid::nil())
        .bind(Json(rules))
        .bind(OffsetDateTime::now_utc())
        .execute(executor)
        .await
        .map_err(Error::Sqlx)?;
        Ok(list_uuid)
    }

    /// Overwrites the `rules` column.
    pub async fn set_rules(
        executor: impl SqliteExecutor<'_>,
        list_uuid: &SmartlistUuid,
        rules: &SmartlistRules,
    ) -> Result<()> {
        let result = sqlx::query(r"UPDATE Smartlist SET rules=?1 WHERE listUuid=?2")
            .bind(Json(rules))
            .bind(list_uuid)
            .execute(executor)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Error::RowIdError {
                entity: Entity::Smartlist,
                message: format!("no smartlist with uuid {}", list_uuid.as_uuid()),
            });
        }
        Ok(())
    }

    /// Deletes the smartlist with the given uuid.
    ///
    /// Returns `false` if no such smartlist existed.
    pub async fn remove(executor: impl SqliteExecutor<'_>, list_uuid: &SmartlistUuid) -> Result<bool> {
        let result = sqlx::query(r"DELETE FROM Smartlist WHERE listUuid=?1")
            .bind(list_uuid)
            .execute(executor)
            .await
            .map_err(Error::Sqlx)?;
        Ok(result.rows_affected() == 1)
    }

    /// All smartlist uuids, unfiltered and in no particular order.
    #[must_use]
    pub fn all_uuids<'a>(executor: impl SqliteExecutor<'a> + 'a) -> BoxStream<'a, sqlx::Result<SmartlistUuid>> {
        sqlx::query_scalar(r"SELECT listUuid FROM Smartlist").fetch(executor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartlistRules {
    #[serde(rename = "match")]
    pub r#match: SmartlistRulesMatch,
    pub rules: Vec<SmartlistRulesItem>,
    pub rv: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartlistRulesItem {
    pub col: String,
    pub con: String,
    pub param: String,
    pub v: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SmartlistRulesMatch {
    One,
    All,
}

#[cfg(test)]
mod tests {
    use sqlx::Connection as _;

    use super::{Smartlist, SmartlistRules, SmartlistRulesMatch};
    use crate::schema::SchemaCreatorValidator as _;
    use crate::version::SchemaVariant;

    async fn unified_conn() -> sqlx::SqliteConnection {
        let mut conn = sqlx::SqliteConnection::connect("sqlite::memory:").await.unwrap();
        SchemaVariant::V3_1_0.creator_validator().create(&mut conn).await.unwrap();
        conn
    }

    fn empty_rules() -> SmartlistRules {
        SmartlistRules {
            r#match: SmartlistRulesMatch::All,
            rules: Vec::new(),
            rv: 1,
        }
    }

    #[tokio::test]
    async fn add_set_rules_then_remove() {
        let mut conn = unified_conn().await;
        let list_uuid = Smartlist::add(&mut conn, "My Smartlist", "", &empty_rules()).await.unwrap();
        assert!(Smartlist::try_load(&mut conn, &list_uuid).await.unwrap().is_some());
        let mut rules = empty_rules();
        rules.rv = 2;
        Smartlist::set_rules(&mut conn, &list_uuid, &rules).await.unwrap();
        assert_eq!(Smartlist::try_load(&mut conn, &list_uuid).await.unwrap().unwrap().rules.rv, 2);
        assert!(Smartlist::remove(&mut conn, &list_uuid).await.unwrap());
        assert!(Smartlist::try_load(&mut conn, &list_uuid).await.unwrap().is_none());
    }
}
