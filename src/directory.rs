// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Directory layout: locating and creating the on-disk files that back a
//! library, and attaching them to a fresh SQLite connection.
//!
//! Two layouts exist, distinguished by major schema version: the legacy
//! two-file `m.db`/`p.db` pair (attached as the `music`/`perfdata` schemas
//! of an in-memory connection), and the unified `Database2/m.db` file used
//! from v2 onward. This module only opens connections and attaches schemas;
//! [`crate::schema`] creates/verifies the catalogue within them and
//! [`crate::detect`] resolves a variant from an already-open connection.

use std::path::{Path, PathBuf};

use sqlx::{Connection, SqliteConnection};

use crate::error::{Error, Result};
use crate::version::Generation;

/// File name of the legacy music database, relative to the library
/// directory.
pub const LEGACY_MUSIC_FILE_NAME: &str = "m.db";
/// File name of the legacy performance-data database, relative to the
/// library directory.
pub const LEGACY_PERFDATA_FILE_NAME: &str = "p.db";
/// Subdirectory holding the unified database from v2 onward.
pub const UNIFIED_SUBDIRECTORY: &str = "Database2";
/// File name of the unified database, relative to [`UNIFIED_SUBDIRECTORY`].
pub const UNIFIED_MUSIC_FILE_NAME: &str = "m.db";

/// Which on-disk layout a library directory uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Two-file `m.db`/`p.db` pair, attached as `music`/`perfdata`.
    Legacy,
    /// Single `Database2/m.db` file.
    Unified,
}

impl Layout {
    /// The [`Generation`] that uses this layout.
    #[must_use]
    pub const fn generation(self) -> Generation {
        match self {
            Self::Legacy => Generation::V1,
            Self::Unified => Generation::V2V3,
        }
    }

    /// The layout that backs a given [`Generation`].
    #[must_use]
    pub const fn for_generation(generation: Generation) -> Self {
        match generation {
            Generation::V1 => Self::Legacy,
            Generation::V2V3 => Self::Unified,
        }
    }
}

/// An opened connection together with the directory it was opened from, as
/// reported to callers. For [`create_temporary`], `directory` is the
/// literal `":memory:"`.
#[derive(Debug)]
pub struct Opened {
    pub conn: SqliteConnection,
    pub directory: PathBuf,
}

fn legacy_music_path(dir: &Path) -> PathBuf {
    dir.join(LEGACY_MUSIC_FILE_NAME)
}

fn legacy_perfdata_path(dir: &Path) -> PathBuf {
    dir.join(LEGACY_PERFDATA_FILE_NAME)
}

fn unified_directory(dir: &Path) -> PathBuf {
    dir.join(UNIFIED_SUBDIRECTORY)
}

fn unified_music_path(dir: &Path) -> PathBuf {
    unified_directory(dir).join(UNIFIED_MUSIC_FILE_NAME)
}

/// Whether a unified-layout (`Database2/m.db`) library exists at `dir`.
#[must_use]
pub fn exists(dir: &Path) -> bool {
    unified_music_path(dir).is_file()
}

/// Detects which layout a library directory uses.
///
/// Fails with [`Error::DatabaseNotFound`] if neither `m.db` nor
/// `Database2/m.db` is present, or if both are: a directory is assumed to
/// hold exactly one library.
pub fn detect(dir: &Path) -> Result<Layout> {
    let legacy = legacy_music_path(dir).is_file();
    let unified = unified_music_path(dir).is_file();
    match (legacy, unified) {
        (true, false) => Ok(Layout::Legacy),
        (false, true) => Ok(Layout::Unified),
        (false, false) => Err(Error::DatabaseNotFound {
            path: dir.to_path_buf(),
            message: "neither m.db nor Database2/m.db was found".to_owned(),
        }),
        (true, true) => Err(Error::DatabaseNotFound {
            path: dir.to_path_buf(),
            message: "found both m.db and Database2/m.db, which is not supposed to happen"
                .to_owned(),
        }),
    }
}

async fn attach_file(conn: &mut SqliteConnection, schema: &str, path: &Path) -> Result<()> {
    let sql = format!("ATTACH DATABASE '{path}' AS {schema}", path = path.display());
    sqlx::query(&sql).execute(conn).await.map_err(Error::Sqlx)?;
    Ok(())
}

/// Creates a fresh library directory for `layout`, returning an attached
/// (legacy) or opened (unified) connection with no catalogue yet.
///
/// Fails with [`Error::DatabaseInconsistency`] if the target database file
/// already exists.
pub async fn create(dir: &Path, layout: Layout) -> Result<Opened> {
    std::fs::create_dir_all(dir).map_err(|source| Error::DatabaseInconsistency {
        message: format!("failed to create directory {}: {source}", dir.display()),
    })?;
    match layout {
        Layout::Legacy => {
            let music_path = legacy_music_path(dir);
            let perfdata_path = legacy_perfdata_path(dir);
            if music_path.exists() || perfdata_path.exists() {
                return Err(Error::DatabaseInconsistency {
                    message: format!(
                        "cannot create new library, as {} already exists",
                        music_path.display()
                    ),
                });
            }
            let mut conn = SqliteConnection::connect("sqlite::memory:")
                .await
                .map_err(Error::Sqlx)?;
            attach_file(&mut conn, "music", &music_path).await?;
            attach_file(&mut conn, "perfdata", &perfdata_path).await?;
            Ok(Opened {
                conn,
                directory: dir.to_path_buf(),
            })
        }
        Layout::Unified => {
            let sub_dir = unified_directory(dir);
            std::fs::create_dir_all(&sub_dir).map_err(|source| Error::DatabaseInconsistency {
                message: format!("failed to create directory {}: {source}", sub_dir.display()),
            })?;
            let music_path = unified_music_path(dir);
            if music_path.exists() {
                return Err(Error::DatabaseInconsistency {
                    message: format!(
                        "cannot create new library, as {} already exists",
                        music_path.display()
                    ),
                });
            }
            let url = format!("sqlite:{path}?mode=rwc", path = music_path.display());
            let conn = SqliteConnection::connect(&url).await.map_err(Error::Sqlx)?;
            Ok(Opened {
                conn,
                directory: dir.to_path_buf(),
            })
        }
    }
}

/// Opens an existing library directory for `layout`.
///
/// Fails with [`Error::DatabaseNotFound`] if the expected database file is
/// missing.
pub async fn load(dir: &Path, layout: Layout) -> Result<Opened> {
    match layout {
        Layout::Legacy => {
            let music_path = legacy_music_path(dir);
            let perfdata_path = legacy_perfdata_path(dir);
            if !music_path.is_file() {
                return Err(Error::DatabaseNotFound {
                    path: dir.to_path_buf(),
                    message: format!("{} was not found", music_path.display()),
                });
            }
            let mut conn = SqliteConnection::connect("sqlite::memory:")
                .await
                .map_err(Error::Sqlx)?;
            attach_file(&mut conn, "music", &music_path).await?;
            attach_file(&mut conn, "perfdata", &perfdata_path).await?;
            Ok(Opened {
                conn,
                directory: dir.to_path_buf(),
            })
        }
        Layout::Unified => {
            let music_path = unified_music_path(dir);
            if !music_path.is_file() {
                return Err(Error::DatabaseNotFound {
                    path: dir.to_path_buf(),
                    message: format!("{} was not found", music_path.display()),
                });
            }
            let url = format!("sqlite:{path}", path = music_path.display());
            let conn = SqliteConnection::connect(&url).await.map_err(Error::Sqlx)?;
            Ok(Opened {
                conn,
                directory: dir.to_path_buf(),
            })
        }
    }
}

/// Creates an in-memory library for `layout`, for tests and scratch use.
///
/// The reported directory is the literal `":memory:"`.
pub async fn create_temporary(layout: Layout) -> Result<Opened> {
    let directory = PathBuf::from(":memory:");
    match layout {
        Layout::Legacy => {
            let mut conn = SqliteConnection::connect("sqlite::memory:")
                .await
                .map_err(Error::Sqlx)?;
            sqlx::query("ATTACH DATABASE ':memory:' AS music")
                .execute(&mut conn)
                .await
                .map_err(Error::Sqlx)?;
            sqlx::query("ATTACH DATABASE ':memory:' AS perfdata")
                .execute(&mut conn)
                .await
                .map_err(Error::Sqlx)?;
            Ok(Opened { conn, directory })
        }
        Layout::Unified => {
            let conn = SqliteConnection::connect("sqlite::memory:")
                .await
                .map_err(Error::Sqlx)?;
            Ok(Opened { conn, directory })
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::Connection;

    use super::{Layout, create, create_temporary, detect, exists, load};

    #[tokio::test]
    async fn detect_fails_on_empty_directory() {
        let dir = tempfile_dir();
        assert!(detect(dir.path()).is_err());
    }

    #[tokio::test]
    async fn create_then_detect_then_load_unified() {
        let dir = tempfile_dir();
        assert!(!exists(dir.path()));
        let opened = create(dir.path(), Layout::Unified).await.unwrap();
        drop(opened);
        assert!(exists(dir.path()));
        assert_eq!(detect(dir.path()).unwrap(), Layout::Unified);
        let mut loaded = load(dir.path(), Layout::Unified).await.unwrap();
        loaded.conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn create_twice_is_inconsistent() {
        let dir = tempfile_dir();
        create(dir.path(), Layout::Unified).await.unwrap();
        assert!(create(dir.path(), Layout::Unified).await.is_err());
    }

    #[tokio::test]
    async fn create_then_load_legacy() {
        let dir = tempfile_dir();
        let opened = create(dir.path(), Layout::Legacy).await.unwrap();
        drop(opened);
        assert_eq!(detect(dir.path()).unwrap(), Layout::Legacy);
        load(dir.path(), Layout::Legacy).await.unwrap();
    }

    #[tokio::test]
    async fn temporary_reports_memory_path() {
        let opened = create_temporary(Layout::Unified).await.unwrap();
        assert_eq!(opened.directory.to_str().unwrap(), ":memory:");
    }

    fn tempfile_dir() -> tempfile_handle::TempDir {
        tempfile_handle::TempDir::new()
    }

    /// Minimal throwaway-directory helper so tests do not pull in a
    /// `tempfile`-crate dependency for a handful of directories.
    mod tempfile_handle {
        use std::path::{Path, PathBuf};

        pub struct TempDir(PathBuf);

        impl TempDir {
            pub fn new() -> Self {
                let mut path = std::env::temp_dir();
                let unique = format!(
                    "enginelib-test-{}-{}",
                    std::process::id(),
                    rand::random::<u64>()
                );
                path.push(unique);
                std::fs::create_dir_all(&path).expect("create temp dir");
                Self(path)
            }

            pub fn path(&self) -> &Path {
                &self.0
            }
        }

        impl Drop for TempDir {
            fn drop(&mut self) {
                let _ = std::fs::remove_dir_all(&self.0);
            }
        }
    }
}
