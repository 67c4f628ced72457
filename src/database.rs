// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use std::path::Path;

use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::information::{information_load_all, information_try_load_by_uuid};
use crate::version::SchemaVariant;
use crate::{DbUuid, Information};

/// Opens a database pool and loads its `Information` row, rejecting
/// databases whose `(major, minor, patch)` triple is not a recognised
/// schema variant.
///
/// Does not attempt to disambiguate `1.18.0`; use
/// [`crate::schema::detect`] when that distinction matters.
pub async fn open_database(
    file_path: impl AsRef<Path>,
    db_uuid: Option<&DbUuid>,
) -> Result<(SqlitePool, Information)> {
    let database_url = format!(
        "sqlite:{file_path}",
        file_path = file_path.as_ref().display()
    );
    let pool = SqlitePool::connect(&database_url)
        .await
        .map_err(Error::Sqlx)?;
    let info = if let Some(db_uuid) = db_uuid {
        let Some(info) = information_try_load_by_uuid(&pool, db_uuid)
            .await
            .map_err(Error::Sqlx)?
        else {
            log::warn!("Found no database information record with UUID {db_uuid}");
            return Err(Error::DatabaseNotFound {
                path: file_path.as_ref().to_path_buf(),
                message: format!("no information record with UUID {db_uuid}"),
            });
        };
        info
    } else {
        let mut info_all = information_load_all(&pool).await.map_err(Error::Sqlx)?;
        let info_count = info_all.len();
        let Some(info) = info_all.pop() else {
            log::warn!("Found no database information records");
            return Err(Error::DatabaseNotFound {
                path: file_path.as_ref().to_path_buf(),
                message: "no information records".to_owned(),
            });
        };
        // Only a single row is expected.
        if !info_all.is_empty() {
            log::warn!("Found multiple ({info_count}) database information records");
            return Err(Error::DatabaseInconsistency {
                message: format!("found {info_count} information records, expected 1"),
            });
        }
        info
    };
    let schema_version = info.schema_version();
    if SchemaVariant::from_version(schema_version, None).is_none() {
        log::error!(
            "Found database {uuid} with unsupported schema version {schema_version}",
            uuid = info.uuid(),
        );
        return Err(Error::UnsupportedDatabase { schema_version });
    }
    Ok((pool, info))
}

pub async fn optimize_database(pool: &SqlitePool) -> Result<()> {
    sqlx::query(r"VACUUM")
        .execute(pool)
        .await
        .map_err(Error::Sqlx)?;
    sqlx::query(r"ANALYZE")
        .execute(pool)
        .await
        .map_err(Error::Sqlx)?;
    Ok(())
}
