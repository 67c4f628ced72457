// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Library Context: binds together the library directory, the on-disk
//! [`Layout`], the detected or chosen [`SchemaVariant`], and the live SQLite
//! handle. Shared by reference across all entity tables; the context is
//! owned by the top-level library object returned from [`LibraryContext::load`]
//! / [`LibraryContext::create`] and its lifetime equals the session's.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::lock::{Mutex, MutexGuard};
use sqlx::SqliteConnection;

use crate::directory::{self, Layout};
use crate::error::Result;
use crate::schema::detect;
use crate::schema::SchemaCreatorValidator as _;
use crate::version::SchemaVariant;

/// Owns the connection behind a reference-counted, async-aware lock rather
/// than a plain `&mut`, since every entity table needs shared access to the
/// same handle for the life of the session. `futures_util::lock::Mutex` is
/// used over `tokio::sync::Mutex` so this module does not require the
/// `batch` feature's tokio dependency.
#[derive(Debug, Clone)]
pub struct LibraryContext {
    directory: PathBuf,
    layout: Layout,
    variant: SchemaVariant,
    conn: Arc<Mutex<SqliteConnection>>,
}

impl LibraryContext {
    /// Creates a fresh library at `dir` for `variant`, emitting its DDL
    /// before returning.
    pub async fn create(dir: impl AsRef<Path>, variant: SchemaVariant) -> Result<Self> {
        let layout = Layout::for_generation(variant.generation());
        let directory::Opened { mut conn, directory } = directory::create(dir.as_ref(), layout).await?;
        variant.creator_validator().create(&mut conn).await?;
        Ok(Self::new(directory, layout, variant, conn))
    }

    /// Opens an existing library at `dir`, detecting its schema variant.
    pub async fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let layout = directory::detect(dir.as_ref())?;
        let directory::Opened { mut conn, directory } = directory::load(dir.as_ref(), layout).await?;
        let variant = detect::detect(&mut conn, layout).await?;
        Ok(Self::new(directory, layout, variant, conn))
    }

    /// Creates an in-memory library for `variant`, for tests and scratch use.
    pub async fn create_temporary(variant: SchemaVariant) -> Result<Self> {
        let layout = Layout::for_generation(variant.generation());
        let directory::Opened { mut conn, directory } = directory::create_temporary(layout).await?;
        variant.creator_validator().create(&mut conn).await?;
        Ok(Self::new(directory, layout, variant, conn))
    }

    fn new(directory: PathBuf, layout: Layout, variant: SchemaVariant, conn: SqliteConnection) -> Self {
        Self {
            directory,
            layout,
            variant,
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// The library directory. For [`Self::create_temporary`], the literal
    /// `":memory:"`.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The on-disk layout this library uses.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// The detected or chosen schema variant.
    #[must_use]
    pub const fn variant(&self) -> SchemaVariant {
        self.variant
    }

    /// Locks the shared connection for exclusive use by one entity-table
    /// operation at a time.
    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().await
    }

    /// Re-verifies the live catalogue against [`Self::variant`]'s expected
    /// schema.
    pub async fn verify(&self) -> Result<()> {
        let mut conn = self.lock().await;
        self.variant.creator_validator().verify(&mut conn).await
    }
}

#[cfg(test)]
mod tests {
    use super::LibraryContext;
    use crate::version::{Generation, SchemaVariant};

    #[tokio::test]
    async fn create_temporary_reports_memory_directory_and_verifies() {
        let context = LibraryContext::create_temporary(SchemaVariant::V3_1_0)
            .await
            .unwrap();
        assert_eq!(context.directory().to_str().unwrap(), ":memory:");
        assert_eq!(context.variant(), SchemaVariant::V3_1_0);
        assert_eq!(context.variant().generation(), Generation::V2V3);
        context.verify().await.unwrap();
    }

    #[tokio::test]
    async fn create_temporary_legacy_verifies() {
        let context = LibraryContext::create_temporary(SchemaVariant::V1_6_0)
            .await
            .unwrap();
        context.verify().await.unwrap();
    }

    #[tokio::test]
    async fn cloned_context_shares_the_same_connection() {
        let context = LibraryContext::create_temporary(SchemaVariant::V3_1_0)
            .await
            .unwrap();
        let clone = context.clone();
        clone.verify().await.unwrap();
    }
}
