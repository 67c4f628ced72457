// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Schema registry: creating and verifying a database's catalogue for any
//! recognised [`SchemaVariant`].
//!
//! One Rust type per DDL family (not per variant): within a family only the
//! version triple, and sometimes one small parameter, differs. Dispatch
//! through [`SchemaCreatorValidator`] plus a data field is composition, not
//! the source's inheritance hierarchy; shared verification of unchanged
//! tables lives in [`catalog`] as free functions rather than as methods
//! overridden down a type hierarchy.

pub mod catalog;
pub mod detect;
mod ddl;

use futures_util::future::BoxFuture;
use sqlx::{Connection, SqliteConnection};

use crate::error::{Error, Result};
use crate::version::{SchemaVariant, SchemaVersion, Subvariant1_18_0};
use ddl::v1_list_era::ListOrderingColumns;

/// Creates and verifies one schema variant's catalogue.
///
/// `create`/`verify` return boxed futures rather than being declared
/// `async fn`: trait methods returning `impl Future` are not object-safe,
/// and boxing by hand avoids pulling in an `async-trait`-style macro crate
/// for what is, underneath, a handful of `sqlx::raw_sql` calls.
pub trait SchemaCreatorValidator: Send + Sync {
    /// Runs the literal `CREATE` DDL against `conn` and seeds the
    /// `Information` row(s) and other default rows a fresh database needs.
    fn create<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>>;

    /// Diffs `conn`'s catalogue against a throwaway in-memory database built
    /// from the same literal DDL, failing with
    /// [`Error::DatabaseInconsistency`] on any difference.
    fn verify<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>>;
}

async fn attach_memory_schema(conn: &mut SqliteConnection, schema: &str) -> Result<()> {
    let sql = format!("ATTACH DATABASE ':memory:' AS {schema}");
    sqlx::query(&sql)
        .execute(conn)
        .await
        .map_err(Error::Sqlx)?;
    Ok(())
}

async fn insert_information_row(
    conn: &mut SqliteConnection,
    table: &str,
    version: SchemaVersion,
    current_played_indicator: i64,
) -> Result<()> {
    let uuid = sqlx::types::Uuid::new_v4().hyphenated().to_string();
    let sql = format!(
        "INSERT INTO {table} \
         (id, uuid, schemaVersionMajor, schemaVersionMinor, schemaVersionPatch, currentPlayedIndiciator) \
         VALUES (1, ?1, ?2, ?3, ?4, ?5)"
    );
    sqlx::query(&sql)
        .bind(uuid)
        .bind(i64::from(version.major))
        .bind(i64::from(version.minor))
        .bind(i64::from(version.patch))
        .bind(current_played_indicator)
        .execute(conn)
        .await
        .map_err(Error::Sqlx)?;
    Ok(())
}

async fn run_default_rows(conn: &mut SqliteConnection, rows: &[&str]) -> Result<()> {
    for row in rows {
        sqlx::raw_sql(row).execute(&mut *conn).await.map_err(Error::Sqlx)?;
    }
    Ok(())
}

/// Creates a two-schema (`music`/`perfdata`) v1 database.
async fn create_v1(
    conn: &mut SqliteConnection,
    version: SchemaVersion,
    music_ddl: &str,
    perfdata_ddl: &str,
    current_played_indicator: i64,
    default_rows: &[&str],
) -> Result<()> {
    sqlx::raw_sql(music_ddl)
        .execute(&mut *conn)
        .await
        .map_err(Error::Sqlx)?;
    sqlx::raw_sql(perfdata_ddl)
        .execute(&mut *conn)
        .await
        .map_err(Error::Sqlx)?;
    insert_information_row(conn, "music.Information", version, current_played_indicator).await?;
    insert_information_row(conn, "perfdata.Information", version, current_played_indicator).await?;
    run_default_rows(conn, default_rows).await
}

/// Verifies a two-schema (`music`/`perfdata`) v1 database against a
/// throwaway reference built from the same literal DDL.
async fn verify_v1(conn: &mut SqliteConnection, music_ddl: &str, perfdata_ddl: &str) -> Result<()> {
    let mut reference = SqliteConnection::connect("sqlite::memory:")
        .await
        .map_err(Error::Sqlx)?;
    attach_memory_schema(&mut reference, "music").await?;
    attach_memory_schema(&mut reference, "perfdata").await?;
    sqlx::raw_sql(music_ddl)
        .execute(&mut reference)
        .await
        .map_err(Error::Sqlx)?;
    sqlx::raw_sql(perfdata_ddl)
        .execute(&mut reference)
        .await
        .map_err(Error::Sqlx)?;
    catalog::verify_against_reference(&mut reference, conn, "music").await?;
    catalog::verify_against_reference(&mut reference, conn, "perfdata").await
}

/// Creates a unified single-schema (`Database2/m.db`) v2/v3 database.
async fn create_unified(
    conn: &mut SqliteConnection,
    version: SchemaVersion,
    ddl: &str,
    current_played_indicator: i64,
    default_rows: &[&str],
) -> Result<()> {
    sqlx::raw_sql(ddl)
        .execute(&mut *conn)
        .await
        .map_err(Error::Sqlx)?;
    insert_information_row(conn, "Information", version, current_played_indicator).await?;
    run_default_rows(conn, default_rows).await
}

/// Verifies a unified single-schema v2/v3 database against a throwaway
/// reference built from the same literal DDL.
async fn verify_unified(conn: &mut SqliteConnection, ddl: &str) -> Result<()> {
    let mut reference = SqliteConnection::connect("sqlite::memory:")
        .await
        .map_err(Error::Sqlx)?;
    sqlx::raw_sql(ddl)
        .execute(&mut reference)
        .await
        .map_err(Error::Sqlx)?;
    catalog::verify_against_reference(&mut reference, conn, "main").await
}

/// `1.6.0`, `1.7.1`: original two-schema layout, no `List` table yet.
struct V1BaseVariant {
    version: SchemaVersion,
}

impl SchemaCreatorValidator for V1BaseVariant {
    fn create<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        let version = self.version;
        Box::pin(async move {
            create_v1(
                conn,
                version,
                ddl::v1_base::CREATE_MUSIC,
                ddl::v1_base::CREATE_PERFDATA,
                ddl::v1_base::CURRENT_PLAYED_INDICATOR_FAKE_VALUE,
                &[
                    ddl::v1_base::DEFAULT_ALBUM_ART_ROW,
                    ddl::v1_base::DEFAULT_HISTORYLIST_ROW,
                    ddl::v1_base::DEFAULT_PREPARELIST_ROW,
                ],
            )
            .await
        })
    }

    fn verify<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        Box::pin(async move { verify_v1(conn, ddl::v1_base::CREATE_MUSIC, ddl::v1_base::CREATE_PERFDATA).await })
    }
}

static V1_6_0: V1BaseVariant = V1BaseVariant {
    version: SchemaVersion {
        major: 1,
        minor: 6,
        patch: 0,
    },
};
static V1_7_1: V1BaseVariant = V1BaseVariant {
    version: SchemaVersion {
        major: 1,
        minor: 7,
        patch: 1,
    },
};

/// `1.9.1` through `1.15.0`: polymorphic `List` table, still two-schema.
struct V1ListEraVariant {
    version: SchemaVersion,
    ordering: ListOrderingColumns,
}

impl SchemaCreatorValidator for V1ListEraVariant {
    fn create<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        let version = self.version;
        let ordering = self.ordering;
        Box::pin(async move {
            let music_ddl = ddl::v1_list_era::create_music_ddl(ordering);
            create_v1(
                conn,
                version,
                &music_ddl,
                ddl::v1_list_era::CREATE_PERFDATA,
                ddl::v1_list_era::CURRENT_PLAYED_INDICATOR_FAKE_VALUE,
                &[
                    ddl::v1_list_era::DEFAULT_ALBUM_ART_ROW,
                    ddl::v1_list_era::DEFAULT_HISTORYLIST_ROW,
                    ddl::v1_list_era::DEFAULT_PREPARELIST_ROW,
                ],
            )
            .await
        })
    }

    fn verify<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        let ordering = self.ordering;
        Box::pin(async move {
            let music_ddl = ddl::v1_list_era::create_music_ddl(ordering);
            verify_v1(conn, &music_ddl, ddl::v1_list_era::CREATE_PERFDATA).await
        })
    }
}

static V1_9_1: V1ListEraVariant = V1ListEraVariant {
    version: SchemaVersion {
        major: 1,
        minor: 9,
        patch: 1,
    },
    ordering: ListOrderingColumns::Absent,
};
static V1_11_1: V1ListEraVariant = V1ListEraVariant {
    version: SchemaVersion {
        major: 1,
        minor: 11,
        patch: 1,
    },
    ordering: ListOrderingColumns::Absent,
};
static V1_13_0: V1ListEraVariant = V1ListEraVariant {
    version: SchemaVersion {
        major: 1,
        minor: 13,
        patch: 0,
    },
    ordering: ListOrderingColumns::Absent,
};
static V1_13_1: V1ListEraVariant = V1ListEraVariant {
    version: SchemaVersion {
        major: 1,
        minor: 13,
        patch: 1,
    },
    ordering: ListOrderingColumns::Untyped,
};
static V1_13_2: V1ListEraVariant = V1ListEraVariant {
    version: SchemaVersion {
        major: 1,
        minor: 13,
        patch: 2,
    },
    ordering: ListOrderingColumns::Typed,
};
static V1_15_0: V1ListEraVariant = V1ListEraVariant {
    version: SchemaVersion {
        major: 1,
        minor: 15,
        patch: 0,
    },
    ordering: ListOrderingColumns::Typed,
};

/// `1.17.0`, `1.18.0`: mature v1 shape, split by desktop vs. on-player
/// `isExternalTrack` declared type.
struct V1MatureVariant {
    version: SchemaVersion,
    is_desktop: bool,
}

impl SchemaCreatorValidator for V1MatureVariant {
    fn create<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        let version = self.version;
        let is_desktop = self.is_desktop;
        Box::pin(async move {
            let music_ddl = ddl::v1_mature::create_music_ddl(is_desktop);
            create_v1(
                conn,
                version,
                &music_ddl,
                ddl::v1_mature::CREATE_PERFDATA,
                ddl::v1_mature::CURRENT_PLAYED_INDICATOR_FAKE_VALUE,
                &[
                    ddl::v1_mature::DEFAULT_ALBUM_ART_ROW,
                    ddl::v1_mature::DEFAULT_HISTORYLIST_ROW,
                    ddl::v1_mature::DEFAULT_PREPARELIST_ROW,
                ],
            )
            .await
        })
    }

    fn verify<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        let is_desktop = self.is_desktop;
        Box::pin(async move {
            let music_ddl = ddl::v1_mature::create_music_ddl(is_desktop);
            verify_v1(conn, &music_ddl, ddl::v1_mature::CREATE_PERFDATA).await
        })
    }
}

static V1_17_0: V1MatureVariant = V1MatureVariant {
    version: SchemaVersion {
        major: 1,
        minor: 17,
        patch: 0,
    },
    is_desktop: true,
};
static V1_18_0_DESKTOP: V1MatureVariant = V1MatureVariant {
    version: SchemaVersion {
        major: 1,
        minor: 18,
        patch: 0,
    },
    is_desktop: true,
};
static V1_18_0_ON_PLAYER: V1MatureVariant = V1MatureVariant {
    version: SchemaVersion {
        major: 1,
        minor: 18,
        patch: 0,
    },
    is_desktop: false,
};

/// `2.18.0`, `2.20.1`, `2.20.2`: first unified single-schema layout.
struct V2BaseVariant {
    version: SchemaVersion,
}

impl SchemaCreatorValidator for V2BaseVariant {
    fn create<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        let version = self.version;
        Box::pin(async move {
            create_unified(
                conn,
                version,
                ddl::v2_base::CREATE,
                ddl::v2_base::CURRENT_PLAYED_INDICATOR_FAKE_VALUE,
                &[ddl::v2_base::DEFAULT_ALBUM_ART_ROW],
            )
            .await
        })
    }

    fn verify<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        Box::pin(async move { verify_unified(conn, ddl::v2_base::CREATE).await })
    }
}

static V2_18_0: V2BaseVariant = V2BaseVariant {
    version: SchemaVersion {
        major: 2,
        minor: 18,
        patch: 0,
    },
};
static V2_20_1: V2BaseVariant = V2BaseVariant {
    version: SchemaVersion {
        major: 2,
        minor: 20,
        patch: 1,
    },
};
static V2_20_2: V2BaseVariant = V2BaseVariant {
    version: SchemaVersion {
        major: 2,
        minor: 20,
        patch: 2,
    },
};

/// Generates a random `currentPlayedIndicator`, matching the upstream
/// source from `2.20.3` onwards (earlier variants share one hard-coded
/// sentinel instead; see [`ddl::v1_base::CURRENT_PLAYED_INDICATOR_FAKE_VALUE`]).
fn random_current_played_indicator() -> i64 {
    rand::random()
}

/// `2.20.3`: adds timestamped edits and per-column `ChangeLog` becomes a
/// view.
struct V2_20_3Variant {
    version: SchemaVersion,
}

impl SchemaCreatorValidator for V2_20_3Variant {
    fn create<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        let version = self.version;
        Box::pin(async move {
            create_unified(
                conn,
                version,
                ddl::v2_20_3::CREATE,
                random_current_played_indicator(),
                &[ddl::v2_20_3::DEFAULT_ALBUM_ART_ROW],
            )
            .await
        })
    }

    fn verify<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        Box::pin(async move { verify_unified(conn, ddl::v2_20_3::CREATE).await })
    }
}

static V2_20_3: V2_20_3Variant = V2_20_3Variant {
    version: SchemaVersion {
        major: 2,
        minor: 20,
        patch: 3,
    },
};

/// `2.21.0` through `2.21.2`: `2.20.3` plus the `Smartlist` table.
struct V2_21Variant {
    version: SchemaVersion,
}

impl SchemaCreatorValidator for V2_21Variant {
    fn create<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        let version = self.version;
        Box::pin(async move {
            let ddl_text = format!("{}\n{}", ddl::v2_21::CREATE_BASE, ddl::v2_21::CREATE_SMARTLIST);
            create_unified(
                conn,
                version,
                &ddl_text,
                random_current_played_indicator(),
                &[ddl::v2_21::DEFAULT_ALBUM_ART_ROW],
            )
            .await
        })
    }

    fn verify<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        Box::pin(async move {
            let ddl_text = format!("{}\n{}", ddl::v2_21::CREATE_BASE, ddl::v2_21::CREATE_SMARTLIST);
            verify_unified(conn, &ddl_text).await
        })
    }
}

static V2_21_0: V2_21Variant = V2_21Variant {
    version: SchemaVersion {
        major: 2,
        minor: 21,
        patch: 0,
    },
};
static V2_21_1: V2_21Variant = V2_21Variant {
    version: SchemaVersion {
        major: 2,
        minor: 21,
        patch: 1,
    },
};
static V2_21_2: V2_21Variant = V2_21Variant {
    version: SchemaVersion {
        major: 2,
        minor: 21,
        patch: 2,
    },
};

/// `3.0.0` through `3.1.0`: `PerformanceData` becomes a real child table of
/// `Track` instead of a view over it.
struct V3Variant {
    version: SchemaVersion,
}

impl SchemaCreatorValidator for V3Variant {
    fn create<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        let version = self.version;
        Box::pin(async move {
            create_unified(
                conn,
                version,
                ddl::v3::CREATE,
                random_current_played_indicator(),
                &[ddl::v3::DEFAULT_ALBUM_ART_ROW],
            )
            .await
        })
    }

    fn verify<'c>(&self, conn: &'c mut SqliteConnection) -> BoxFuture<'c, Result<()>> {
        Box::pin(async move { verify_unified(conn, ddl::v3::CREATE).await })
    }
}

static V3_0_0: V3Variant = V3Variant {
    version: SchemaVersion {
        major: 3,
        minor: 0,
        patch: 0,
    },
};
static V3_0_1: V3Variant = V3Variant {
    version: SchemaVersion {
        major: 3,
        minor: 0,
        patch: 1,
    },
};
static V3_1_0: V3Variant = V3Variant {
    version: SchemaVersion {
        major: 3,
        minor: 1,
        patch: 0,
    },
};

impl SchemaVariant {
    /// Looks up the creator/validator for this variant.
    #[must_use]
    pub fn creator_validator(self) -> &'static dyn SchemaCreatorValidator {
        match self {
            Self::V1_6_0 => &V1_6_0,
            Self::V1_7_1 => &V1_7_1,
            Self::V1_9_1 => &V1_9_1,
            Self::V1_11_1 => &V1_11_1,
            Self::V1_13_0 => &V1_13_0,
            Self::V1_13_1 => &V1_13_1,
            Self::V1_13_2 => &V1_13_2,
            Self::V1_15_0 => &V1_15_0,
            Self::V1_17_0 => &V1_17_0,
            Self::V1_18_0(Subvariant1_18_0::Desktop) => &V1_18_0_DESKTOP,
            Self::V1_18_0(Subvariant1_18_0::OnPlayer) => &V1_18_0_ON_PLAYER,
            Self::V2_18_0 => &V2_18_0,
            Self::V2_20_1 => &V2_20_1,
            Self::V2_20_2 => &V2_20_2,
            Self::V2_20_3 => &V2_20_3,
            Self::V2_21_0 => &V2_21_0,
            Self::V2_21_1 => &V2_21_1,
            Self::V2_21_2 => &V2_21_2,
            Self::V3_0_0 => &V3_0_0,
            Self::V3_0_1 => &V3_0_1,
            Self::V3_1_0 => &V3_1_0,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::Connection;
    use sqlx::SqliteConnection;

    use crate::version::{Generation, SchemaVariant};

    #[tokio::test]
    async fn create_then_verify_every_variant() {
        for &variant in SchemaVariant::ALL {
            let mut conn = SqliteConnection::connect("sqlite::memory:")
                .await
                .unwrap_or_else(|error| panic!("connect for {variant:?}: {error}"));
            if variant.generation() == Generation::V1 {
                super::attach_memory_schema(&mut conn, "music")
                    .await
                    .unwrap_or_else(|error| panic!("attach music for {variant:?}: {error}"));
                super::attach_memory_schema(&mut conn, "perfdata")
                    .await
                    .unwrap_or_else(|error| panic!("attach perfdata for {variant:?}: {error}"));
            }
            let creator_validator = variant.creator_validator();
            creator_validator
                .create(&mut conn)
                .await
                .unwrap_or_else(|error| panic!("create {variant:?}: {error}"));
            creator_validator
                .verify(&mut conn)
                .await
                .unwrap_or_else(|error| panic!("verify {variant:?}: {error}"));
        }
    }
}
