// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Shared "walk the catalogue and compare" verification helpers.
//!
//! [`verify_against_reference`] diffs a target database's catalogue against
//! a freshly created in-memory reference of the same variant, column by
//! column, so the literal `CREATE` DDL stays the single source of truth for
//! what "correct" looks like.

use sqlx::{Row, SqliteExecutor};

use crate::error::{Error, Result};

fn inconsistency(message: impl Into<String>) -> Error {
    Error::DatabaseInconsistency {
        message: message.into(),
    }
}

/// One row of `sqlite_master`, reduced to what [`verify_against_reference`]
/// compares.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CatalogueEntry {
    name: String,
    kind: String,
}

async fn catalogue_entries<'e>(
    executor: impl SqliteExecutor<'e>,
    schema: &str,
) -> Result<Vec<CatalogueEntry>> {
    let query = format!(
        r"SELECT name, type FROM {schema}.sqlite_master
           WHERE type IN ('table', 'view', 'index')
           AND name NOT LIKE 'sqlite_%'
           ORDER BY name"
    );
    let rows = sqlx::query(&query)
        .fetch_all(executor)
        .await
        .map_err(Error::Sqlx)?;
    rows.into_iter()
        .map(|row| {
            Ok(CatalogueEntry {
                name: row.try_get("name").map_err(Error::Sqlx)?,
                kind: row.try_get("type").map_err(Error::Sqlx)?,
            })
        })
        .collect()
}

/// Verifies that `target`'s catalogue is exactly the same shape as
/// `reference`'s: the same set of tables, views, and indices, each with the
/// same columns (name, declared type, nullability, default expression,
/// primary key ordinal) in the same order.
///
/// `reference` is expected to be a throwaway, freshly created in-memory
/// database built by running the same literal `CREATE` text that would be
/// used to create a real database of this variant. Diffing against a
/// golden reference instead of hand-maintained expectation tables keeps the
/// literal DDL constants as the single source of truth.
pub async fn verify_against_reference(
    reference: &mut sqlx::SqliteConnection,
    target: &mut sqlx::SqliteConnection,
    schema: &str,
) -> Result<()> {
    let reference_entries = catalogue_entries(&mut *reference, schema).await?;
    let target_entries = catalogue_entries(&mut *target, schema).await?;
    if reference_entries.len() != target_entries.len() {
        return Err(inconsistency(format!(
            "catalogue has {actual} tables/views/indices, expected {expected}",
            actual = target_entries.len(),
            expected = reference_entries.len()
        )));
    }
    for (reference_entry, target_entry) in reference_entries.iter().zip(&target_entries) {
        if reference_entry != target_entry {
            return Err(inconsistency(format!(
                "catalogue mismatch: found {target_entry:?}, expected {reference_entry:?}"
            )));
        }
        if reference_entry.kind == "index" {
            continue;
        }
        let reference_columns = table_info_in_schema(&mut *reference, schema, &reference_entry.name).await?;
        let target_columns = table_info_in_schema(&mut *target, schema, &target_entry.name).await?;
        if reference_columns != target_columns {
            return Err(inconsistency(format!(
                "\"{name}\" column metadata mismatch: found {target_columns:?}, expected {reference_columns:?}",
                name = target_entry.name
            )));
        }
    }
    Ok(())
}

/// A `PRAGMA table_info` row, typed field-by-field so comparison does not
/// depend on every driver coercing each field to the same Rust type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ColumnInfo {
    pub(crate) name: String,
    pub(crate) declared_type: String,
    pub(crate) not_null: i64,
    pub(crate) default_value: Option<String>,
    pub(crate) primary_key: i64,
}

pub(crate) async fn table_info_in_schema<'e>(
    executor: impl SqliteExecutor<'e>,
    schema: &str,
    name: &str,
) -> Result<Vec<ColumnInfo>> {
    let pragma = format!("PRAGMA {schema}.table_info(\"{name}\")");
    let rows = sqlx::query(&pragma)
        .fetch_all(executor)
        .await
        .map_err(Error::Sqlx)?;
    rows.into_iter()
        .map(|row| {
            Ok(ColumnInfo {
                name: row.try_get("name").map_err(Error::Sqlx)?,
                declared_type: row.try_get("type").map_err(Error::Sqlx)?,
                not_null: row.try_get("notnull").map_err(Error::Sqlx)?,
                default_value: row.try_get("dflt_value").map_err(Error::Sqlx)?,
                primary_key: row.try_get("pk").map_err(Error::Sqlx)?,
            })
        })
        .collect()
}

