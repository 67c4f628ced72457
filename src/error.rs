// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use std::path::PathBuf;

use crate::TrackId;
use crate::version::SchemaVersion;

/// Entity tag used by [`Error::RowIdError`].
///
/// One value per entity table named in the `*_row_id_error` error kind,
/// rather than one enum variant per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Entity {
    Track,
    PerformanceData,
    AlbumArt,
    Playlist,
    PlaylistEntity,
    Historylist,
    HistorylistEntity,
    Preparelist,
    PreparelistEntity,
    Crate,
    Smartlist,
    Pack,
    Information,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Track => "Track",
            Self::PerformanceData => "PerformanceData",
            Self::AlbumArt => "AlbumArt",
            Self::Playlist => "Playlist",
            Self::PlaylistEntity => "PlaylistEntity",
            Self::Historylist => "Historylist",
            Self::HistorylistEntity => "HistorylistEntity",
            Self::Preparelist => "Preparelist",
            Self::PreparelistEntity => "PreparelistEntity",
            Self::Crate => "Crate",
            Self::Smartlist => "Smartlist",
            Self::Pack => "Pack",
            Self::Information => "Information",
        };
        f.write_str(name)
    }
}

/// Error taxonomy shared by every public operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("database not found at {path}: {message}")]
    DatabaseNotFound { path: PathBuf, message: String },

    #[error("database inconsistency: {message}")]
    DatabaseInconsistency { message: String },

    #[error("unsupported database schema version {schema_version:?}")]
    UnsupportedDatabase { schema_version: SchemaVersion },

    #[error("unsupported operation: {message}")]
    UnsupportedOperation { message: String },

    #[error("invalid row id for {entity}: {message}")]
    RowIdError { entity: Entity, message: String },

    #[error("invalid crate name {name:?}")]
    CrateInvalidName { name: String },

    #[error("invalid playlist name {name:?}")]
    PlaylistInvalidName { name: String },

    #[error("invalid crate parent")]
    CrateInvalidParent,

    #[error("invalid playlist parent")]
    PlaylistInvalidParent,

    #[error("track {track_id} database inconsistency: {message}")]
    TrackDatabaseInconsistency { track_id: TrackId, message: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Validates a crate or playlist name.
///
/// Names must be non-empty and must not contain the path segment separator
/// `;`, matching the constraint enforced (for playlists) by
/// [`crate::is_valid_playlist_path_segment`].
pub(crate) fn validate_name(name: &str) -> bool {
    crate::is_valid_playlist_path_segment(name)
}
