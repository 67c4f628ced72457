// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Literal DDL for the v1 variants spanning the introduction of the
//! polymorphic `List` table (`1.9.1`) through to its maturation into the
//! shape carried by `1.17.0` (see [`super::v1_mature`]).
//!
//! `List.ordering`/`List.trackCount` go through three shapes across this
//! span:
//!
//! - `1.9.1`, `1.11.1`, `1.13.0`: neither column exists yet.
//! - `1.13.1`: both columns exist but are declared with no type at all
//!   (`DEFAULT [0]`), which `PRAGMA table_info` reports as an empty type
//!   string. This is not a transcription error; the upstream source
//!   declares them this way.
//! - `1.13.2`, `1.15.0`: both columns are declared `INTEGER`, as in
//!   `1.17.0`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrderingColumns {
    Absent,
    Untyped,
    Typed,
}

const CREATE_MUSIC_TEMPLATE: &str = r#"
CREATE TABLE music.Track ( [id] INTEGER, [playOrder] INTEGER, [length] INTEGER, [lengthCalculated] INTEGER, [bpm] INTEGER, [year] INTEGER, [path] TEXT, [filename] TEXT, [bitrate] INTEGER, [bpmAnalyzed] REAL, [trackType] INTEGER, [isExternalTrack] NUMERIC, [uuidOfExternalDatabase] TEXT, [idTrackInExternalDatabase] INTEGER, [idAlbumArt] INTEGER, [pdbImportKey] INTEGER, PRIMARY KEY ( [id] ), FOREIGN KEY ( [idAlbumArt] ) REFERENCES AlbumArt ( [id] )  ON DELETE RESTRICT);
CREATE TABLE music.Information ( [id] INTEGER, [uuid] TEXT, [schemaVersionMajor] INTEGER, [schemaVersionMinor] INTEGER, [schemaVersionPatch] INTEGER, [currentPlayedIndiciator] INTEGER, [lastRekordBoxLibraryImportReadCounter] INTEGER, PRIMARY KEY ( [id] ) );
CREATE TABLE music.MetaData ( [id] INTEGER, [type] INTEGER, [text] TEXT, PRIMARY KEY ( [id], [type] ) , FOREIGN KEY ( [id] ) REFERENCES Track ( [id] )  ON DELETE CASCADE);
CREATE TABLE music.MetaDataInteger ( [id] INTEGER, [type] INTEGER, [value] INTEGER, PRIMARY KEY ( [id], [type] ) , FOREIGN KEY ( [id] ) REFERENCES Track ( [id] )  ON DELETE CASCADE);
CREATE TABLE music.AlbumArt ( [id] INTEGER, [hash] TEXT, [albumArt] BLOB, PRIMARY KEY ( [id] ) );
CREATE TABLE music.CopiedTrack ( [trackId] INTEGER, [uuidOfSourceDatabase] TEXT, [idOfTrackInSourceDatabase] INTEGER, PRIMARY KEY ( [trackId] ) , FOREIGN KEY ( [trackId] ) REFERENCES Track ( [id] )  ON DELETE CASCADE);
CREATE TABLE music.List ( [id] INTEGER, [type] INTEGER, [title] TEXT, [path] TEXT, [isFolder] NUMERIC{list_ordering_columns}, PRIMARY KEY ( [id], [type] ) );
CREATE TABLE music.ListTrackList ( [id] INTEGER, [listId] INTEGER, [listType] INTEGER, [trackId] INTEGER, [trackIdInOriginDatabase] INTEGER, [databaseUuid] TEXT, [trackNumber] INTEGER, PRIMARY KEY ( [id] ) , FOREIGN KEY ( [listId], [listType] ) REFERENCES List ( [id], [type] )  ON DELETE CASCADE, FOREIGN KEY ( [trackId] ) REFERENCES Track ( [id] )  ON DELETE CASCADE);
CREATE TABLE music.ListHierarchy ( [listId] INTEGER, [listType] INTEGER, [listIdChild] INTEGER, [listTypeChild] INTEGER, FOREIGN KEY ( [listId], [listType] ) REFERENCES List ( [id], [type] )  ON DELETE CASCADE, FOREIGN KEY ( [listIdChild], [listTypeChild] ) REFERENCES List ( [id], [type] )  ON DELETE CASCADE);
CREATE TABLE music.ListParentList ( [listOriginId] INTEGER, [listOriginType] INTEGER, [listParentId] INTEGER, [listParentType] INTEGER, FOREIGN KEY ( [listOriginId], [listOriginType] ) REFERENCES List ( [id], [type] )  ON DELETE CASCADE, FOREIGN KEY ( [listParentId], [listParentType] ) REFERENCES List ( [id], [type] )  ON DELETE CASCADE);
CREATE INDEX music.index_Track_id ON Track ( id );
CREATE INDEX music.index_Track_path ON Track ( path );
CREATE INDEX music.index_Track_filename ON Track ( filename );
CREATE INDEX music.index_Track_isExternalTrack ON Track ( isExternalTrack );
CREATE INDEX music.index_Track_uuidOfExternalDatabase ON Track ( uuidOfExternalDatabase );
CREATE INDEX music.index_Track_idTrackInExternalDatabase ON Track ( idTrackInExternalDatabase );
CREATE INDEX music.index_Track_idAlbumArt ON Track ( idAlbumArt );
CREATE INDEX music.index_Information_id ON Information ( id );
CREATE INDEX music.index_MetaData_id ON MetaData ( id );
CREATE INDEX music.index_MetaData_type ON MetaData ( type );
CREATE INDEX music.index_MetaData_text ON MetaData ( text );
CREATE INDEX music.index_MetaDataInteger_id ON MetaDataInteger ( id );
CREATE INDEX music.index_MetaDataInteger_type ON MetaDataInteger ( type );
CREATE INDEX music.index_MetaDataInteger_value ON MetaDataInteger ( value );
CREATE INDEX music.index_AlbumArt_id ON AlbumArt ( id );
CREATE INDEX music.index_AlbumArt_hash ON AlbumArt ( hash );
CREATE INDEX music.index_CopiedTrack_trackId ON CopiedTrack ( trackId );
CREATE INDEX music.index_List_id ON List ( id );
CREATE INDEX music.index_List_type ON List ( type );
CREATE INDEX music.index_List_path ON List ( path );
CREATE VIEW music.Playlist AS SELECT id, title FROM List WHERE type = 1;
CREATE VIEW music.Historylist AS SELECT id, title FROM List WHERE type = 2;
CREATE VIEW music.Preparelist AS SELECT id, title FROM List WHERE type = 3;
CREATE VIEW music.Crate AS SELECT id AS id, title AS title, path AS path FROM List WHERE type = 4;
CREATE INDEX music.index_ListTrackList_listId ON ListTrackList ( listId );
CREATE INDEX music.index_ListTrackList_listType ON ListTrackList ( listType );
CREATE INDEX music.index_ListTrackList_trackId ON ListTrackList ( trackId );
CREATE VIEW music.PlaylistTrackList AS SELECT listId AS playlistId, trackId, trackIdInOriginDatabase, databaseUuid, trackNumber FROM ListTrackList AS ltl INNER JOIN List AS l ON l.id = ltl.listId AND l.type = ltl.listType WHERE ltl.listType = 1;
CREATE VIEW music.HistorylistTrackList AS SELECT listId AS historylistId, trackId, trackIdInOriginDatabase, databaseUuid, 0 AS date FROM ListTrackList AS ltl INNER JOIN List AS l ON l.id = ltl.listId AND l.type = ltl.listType WHERE ltl.listType = 2;
CREATE VIEW music.PreparelistTrackList AS SELECT listId AS playlistId, trackId, trackIdInOriginDatabase, databaseUuid, trackNumber FROM ListTrackList AS ltl INNER JOIN List AS l ON l.id = ltl.listId AND l.type = ltl.listType WHERE ltl.listType = 3;
CREATE VIEW music.CrateTrackList AS SELECT listId AS crateId, trackId AS trackId FROM ListTrackList AS ltl INNER JOIN List AS l ON l.id = ltl.listId AND l.type = ltl.listType WHERE ltl.listType = 4;
CREATE INDEX music.index_ListHierarchy_listId ON ListHierarchy ( listId );
CREATE INDEX music.index_ListHierarchy_listType ON ListHierarchy ( listType );
CREATE INDEX music.index_ListHierarchy_listIdChild ON ListHierarchy ( listIdChild );
CREATE INDEX music.index_ListHierarchy_listTypeChild ON ListHierarchy ( listTypeChild );
CREATE VIEW music.CrateHierarchy AS SELECT listId AS crateId, listIdChild AS crateIdChild FROM ListHierarchy WHERE listType = 4 AND listTypeChild = 4;
CREATE INDEX music.index_ListParentList_listOriginId ON ListParentList ( listOriginId );
CREATE INDEX music.index_ListParentList_listOriginType ON ListParentList ( listOriginType );
CREATE INDEX music.index_ListParentList_listParentId ON ListParentList ( listParentId );
CREATE INDEX music.index_ListParentList_listParentType ON ListParentList ( listParentType );
CREATE VIEW music.CrateParentList AS SELECT listOriginId AS crateOriginId, listParentId AS crateParentId FROM ListParentList WHERE listOriginType = 4 AND listParentType = 4;
"#;

pub const CREATE_PERFDATA: &str = r#"
CREATE TABLE perfdata.PerformanceData ( [id] INTEGER, [isAnalyzed] NUMERIC, [isRendered] NUMERIC, [trackData] BLOB, [highResolutionWaveFormData] BLOB, [overviewWaveFormData] BLOB, [beatData] BLOB, [quickCues] BLOB, [loops] BLOB, [hasSeratoValues] NUMERIC, [hasRekordboxValues] NUMERIC, [hasTraktorValues] NUMERIC, PRIMARY KEY ( [id] ) );
CREATE TABLE perfdata.Information ( [id] INTEGER, [uuid] TEXT, [schemaVersionMajor] INTEGER, [schemaVersionMinor] INTEGER, [schemaVersionPatch] INTEGER, [currentPlayedIndiciator] INTEGER, [lastRekordBoxLibraryImportReadCounter] INTEGER, PRIMARY KEY ( [id] ) );
CREATE INDEX perfdata.index_PerformanceData_id ON PerformanceData ( id );
CREATE INDEX perfdata.index_Information_id ON Information ( id );
"#;

pub const CURRENT_PLAYED_INDICATOR_FAKE_VALUE: i64 = 5_100_658_837_829_259_927;

pub const DEFAULT_ALBUM_ART_ROW: &str = r"INSERT INTO music.AlbumArt VALUES (1, '', NULL)";

// Inserted straight into `List`, not through the `Historylist`/`Preparelist`
// views: this era does not yet carry `INSTEAD OF INSERT` triggers on those
// views (see `super::v1_mature`, which does).
pub const DEFAULT_HISTORYLIST_ROW: &str =
    r"INSERT INTO music.List (id, type, title, path, isFolder) VALUES (1, 2, 'History 1', 'History 1;', 0)";
pub const DEFAULT_PREPARELIST_ROW: &str =
    r"INSERT INTO music.List (id, type, title, path, isFolder) VALUES (1, 3, 'Prepare', 'Prepare;', 0)";

#[must_use]
pub fn create_music_ddl(list_ordering_columns: ListOrderingColumns) -> String {
    let list_ordering_columns = match list_ordering_columns {
        ListOrderingColumns::Absent => String::new(),
        ListOrderingColumns::Untyped => ", [trackCount] DEFAULT [0], [ordering] DEFAULT [0]".to_owned(),
        ListOrderingColumns::Typed => ", [trackCount] INTEGER, [ordering] INTEGER".to_owned(),
    };
    CREATE_MUSIC_TEMPLATE.replace("{list_ordering_columns}", &list_ordering_columns)
}
