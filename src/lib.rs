// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

#![expect(rustdoc::invalid_rust_codeblocks)] // Do not interpret code blocks, e.g. license comments.
#![doc = include_str!("../README.md")]

mod album_art;

pub use self::album_art::{AlbumArt, AlbumArtId, AlbumArtImageQuality};

pub mod blob;

mod changelog;
pub use self::changelog::{ChangeLog, ChangeLogId};

mod context;
pub use self::context::LibraryContext;

mod database;
pub use self::database::{open_database, optimize_database};

mod db_id;

pub mod directory;
pub use self::directory::Layout;

mod db_uuid;
pub use self::db_uuid::DbUuid;

pub mod error;
pub use self::error::{Entity, Error, Result};

mod historylist;
pub use self::historylist::{Historylist, HistorylistEntity, HistorylistEntityId, HistorylistId};

mod information;
pub use self::information::{Information, InformationId};

mod krate;
pub use self::krate::{Crate, CrateId};

mod pack;
pub use self::pack::{Pack, PackId, PackUuid};

mod performance;
pub use self::performance::PerformanceData;

mod playlist;
pub use self::playlist::{
    PLAYLIST_PATH_SEGMENT_SEPARATOR, Playlist, PlaylistAllChildren, PlaylistAllChildrenId,
    PlaylistAllParent, PlaylistAllParentId, PlaylistEntity, PlaylistEntityId, PlaylistId,
    PlaylistPath, PlaylistPathId, concat_playlist_path_segments_to_string,
    is_valid_playlist_path_segment,
};

mod preparelist;
pub use self::preparelist::{PreparelistEntry, PreparelistEntryId};

pub mod schema;
pub use self::schema::SchemaCreatorValidator;

mod smartlist;
pub use self::smartlist::{
    Smartlist, SmartlistRules, SmartlistRulesItem, SmartlistRulesMatch, SmartlistUuid,
};

mod track;
pub use self::track::{Track, TrackId};

mod unix_timestamp;
pub use self::unix_timestamp::UnixTimestamp;

pub mod version;
pub use self::version::{Generation, SchemaVariant, SchemaVersion, Subvariant1_18_0};

#[cfg(feature = "batch")]
pub mod batch;
#[cfg(feature = "batch")]
pub use self::batch::BatchOutcome;
