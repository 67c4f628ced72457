// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Resolves an already-open connection's [`SchemaVariant`] from its
//! `Information` row, handling the two places the version triple alone is
//! ambiguous: the `1.18.0` desktop/on-player split, and the `ChangeLog`
//! table-vs-view tie-break around `2.20.3`.

use sqlx::SqliteConnection;

use crate::directory::Layout;
use crate::error::{Error, Result};
use crate::version::{SchemaVariant, SchemaVersion, Subvariant1_18_0};

fn information_table(layout: Layout) -> &'static str {
    match layout {
        Layout::Legacy => "music.Information",
        Layout::Unified => "Information",
    }
}

async fn read_version_triple(conn: &mut SqliteConnection, layout: Layout) -> Result<SchemaVersion> {
    let sql = format!(
        "SELECT schemaVersionMajor, schemaVersionMinor, schemaVersionPatch FROM {table}",
        table = information_table(layout)
    );
    let rows: Vec<(i64, i64, i64)> = sqlx::query_as(&sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(Error::Sqlx)?;
    match rows.as_slice() {
        [] => Err(Error::DatabaseInconsistency {
            message: "found no Information row".to_owned(),
        }),
        [(major, minor, patch)] => Ok(SchemaVersion {
            major: (*major).try_into().unwrap_or(u32::MAX),
            minor: (*minor).try_into().unwrap_or(u32::MAX),
            patch: (*patch).try_into().unwrap_or(u32::MAX),
        }),
        _ => Err(Error::DatabaseInconsistency {
            message: format!("found {} Information rows, expected 1", rows.len()),
        }),
    }
}

/// Probes `Track.isExternalTrack`'s declared column type to disambiguate
/// the `1.18.0` desktop/on-player split (see
/// [`super::ddl::v1_mature::isexternaltrack_declared_type`]).
async fn probe_1_18_0_subvariant(conn: &mut SqliteConnection) -> Result<Subvariant1_18_0> {
    let declared_type: Option<String> = sqlx::query_scalar(
        r"SELECT type FROM pragma_table_info('Track', 'music') WHERE name = 'isExternalTrack'",
    )
    .fetch_optional(&mut *conn)
    .await
    .map_err(Error::Sqlx)?;
    let desktop_type = super::ddl::v1_mature::isexternaltrack_declared_type(true);
    match declared_type {
        Some(ty) if ty.eq_ignore_ascii_case(desktop_type) => Ok(Subvariant1_18_0::Desktop),
        Some(_) => Ok(Subvariant1_18_0::OnPlayer),
        None => Err(Error::DatabaseInconsistency {
            message: "Track.isExternalTrack column not found".to_owned(),
        }),
    }
}

/// Cross-checks the `ChangeLog` catalogue entry's kind against what
/// `2.20.3`'s demotion from table to view implies for `version`.
async fn verify_changelog_kind(conn: &mut SqliteConnection, version: SchemaVersion) -> Result<()> {
    let expect_view = version
        >= SchemaVersion {
            major: 2,
            minor: 20,
            patch: 3,
        };
    let kind: Option<String> =
        sqlx::query_scalar(r"SELECT type FROM sqlite_master WHERE name = 'ChangeLog'")
            .fetch_optional(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
    let is_view = kind.as_deref() == Some("view");
    if is_view != expect_view {
        return Err(Error::DatabaseInconsistency {
            message: format!(
                "ChangeLog catalogue entry is {kind:?}, expected {}",
                if expect_view { "a view" } else { "a table" }
            ),
        });
    }
    Ok(())
}

fn known_minor(version: SchemaVersion) -> bool {
    SchemaVariant::ALL.iter().any(|variant| {
        let full = variant.version();
        full.major == version.major && full.minor == version.minor
    })
}

/// Resolves `conn`'s schema variant.
///
/// `conn` must already be routed according to `layout` (attached
/// `music`/`perfdata` schemas for [`Layout::Legacy`], or a plain open
/// connection for [`Layout::Unified`]); see [`crate::directory`].
pub async fn detect(conn: &mut SqliteConnection, layout: Layout) -> Result<SchemaVariant> {
    let version = read_version_triple(conn, layout).await?;
    let subvariant = if version.major == 1 && version.minor == 18 && version.patch == 0 {
        Some(probe_1_18_0_subvariant(conn).await?)
    } else {
        None
    };
    let variant = match SchemaVariant::from_version(version, subvariant) {
        Some(variant) => variant,
        None if known_minor(version) => {
            return Err(Error::UnsupportedDatabase {
                schema_version: version,
            });
        }
        None => {
            return Err(Error::DatabaseInconsistency {
                message: format!("unrecognised schema version {version}"),
            });
        }
    };
    if layout == Layout::Unified {
        verify_changelog_kind(conn, version).await?;
    }
    Ok(variant)
}

#[cfg(test)]
mod tests {
    use sqlx::Connection;
    use sqlx::SqliteConnection;

    use super::detect;
    use crate::directory::Layout;
    use crate::version::{SchemaVariant, Subvariant1_18_0};

    async fn prepared(variant: SchemaVariant) -> (SqliteConnection, Layout) {
        let layout = Layout::for_generation(variant.generation());
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        if layout == Layout::Legacy {
            sqlx::query("ATTACH DATABASE ':memory:' AS music")
                .execute(&mut conn)
                .await
                .unwrap();
            sqlx::query("ATTACH DATABASE ':memory:' AS perfdata")
                .execute(&mut conn)
                .await
                .unwrap();
        }
        variant.creator_validator().create(&mut conn).await.unwrap();
        (conn, layout)
    }

    #[tokio::test]
    async fn detects_every_variant() {
        for &variant in SchemaVariant::ALL {
            let (mut conn, layout) = prepared(variant).await;
            let detected = detect(&mut conn, layout)
                .await
                .unwrap_or_else(|error| panic!("detect {variant:?}: {error}"));
            assert_eq!(detected, variant, "mismatch for {variant:?}");
        }
    }

    #[tokio::test]
    async fn desktop_and_on_player_1_18_0_are_distinguished() {
        let (mut desktop_conn, layout) =
            prepared(SchemaVariant::V1_18_0(Subvariant1_18_0::Desktop)).await;
        assert_eq!(
            detect(&mut desktop_conn, layout).await.unwrap(),
            SchemaVariant::V1_18_0(Subvariant1_18_0::Desktop)
        );
        let (mut on_player_conn, layout) =
            prepared(SchemaVariant::V1_18_0(Subvariant1_18_0::OnPlayer)).await;
        assert_eq!(
            detect(&mut on_player_conn, layout).await.unwrap(),
            SchemaVariant::V1_18_0(Subvariant1_18_0::OnPlayer)
        );
    }
}
