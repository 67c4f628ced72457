// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Literal DDL for schema variants `1.6.0` and `1.7.1`.
//!
//! The two variants are structurally identical; `1.7.1` only changed a few
//! `verify_*` type/affinity assertions on the C++ side, which is not
//! observable through `PRAGMA table_info`. Both reuse this module.

/// DDL for the `music` schema (attached from `m.db`).
pub const CREATE_MUSIC: &str = r#"
CREATE TABLE music.Track ( [id] INTEGER, [playOrder] INTEGER , [length] INTEGER , [lengthCalculated] INTEGER , [bpm] INTEGER , [year] INTEGER , [path] TEXT , [filename] TEXT , [bitrate] INTEGER , [bpmAnalyzed] REAL , [trackType] INTEGER , [isExternalTrack] NUMERIC , [uuidOfExternalDatabase] TEXT , [idTrackInExternalDatabase] INTEGER , [idAlbumArt] INTEGER  REFERENCES AlbumArt ( id )  ON DELETE RESTRICT, PRIMARY KEY ( [id] ) );
CREATE INDEX music.index_Track_id ON Track ( id );
CREATE INDEX music.index_Track_path ON Track ( path );
CREATE INDEX music.index_Track_filename ON Track ( filename );
CREATE INDEX music.index_Track_isExternalTrack ON Track ( isExternalTrack );
CREATE INDEX music.index_Track_uuidOfExternalDatabase ON Track ( uuidOfExternalDatabase );
CREATE INDEX music.index_Track_idTrackInExternalDatabase ON Track ( idTrackInExternalDatabase );
CREATE INDEX music.index_Track_idAlbumArt ON Track ( idAlbumArt );

CREATE TABLE music.Information ( [id] INTEGER, [uuid] TEXT , [schemaVersionMajor] INTEGER , [schemaVersionMinor] INTEGER , [schemaVersionPatch] INTEGER , [currentPlayedIndiciator] INTEGER , PRIMARY KEY ( [id] ) );
CREATE INDEX music.index_Information_id ON Information ( id );

CREATE TABLE music.MetaData ( [id] INTEGER  REFERENCES Track ( id )  ON DELETE CASCADE, [type] INTEGER, [text] TEXT , PRIMARY KEY ( [id], [type] ) );
CREATE INDEX music.index_MetaData_id ON MetaData ( id );
CREATE INDEX music.index_MetaData_type ON MetaData ( type );
CREATE INDEX music.index_MetaData_text ON MetaData ( text );

CREATE TABLE music.MetaDataInteger ( [id] INTEGER  REFERENCES Track ( id )  ON DELETE CASCADE, [type] INTEGER, [value] INTEGER , PRIMARY KEY ( [id], [type] ) );
CREATE INDEX music.index_MetaDataInteger_id ON MetaDataInteger ( id );
CREATE INDEX music.index_MetaDataInteger_type ON MetaDataInteger ( type );
CREATE INDEX music.index_MetaDataInteger_value ON MetaDataInteger ( value );

CREATE TABLE music.Playlist ( [id] INTEGER, [title] TEXT , PRIMARY KEY ( [id] ) );
CREATE INDEX music.index_Playlist_id ON Playlist ( id );

CREATE TABLE music.PlaylistTrackList ( [playlistId] INTEGER  REFERENCES Playlist ( id )  ON DELETE CASCADE, [trackId] INTEGER  REFERENCES Track ( id )  ON DELETE CASCADE, [trackIdInOriginDatabase] INTEGER , [databaseUuid] TEXT , [trackNumber] INTEGER );
CREATE INDEX music.index_PlaylistTrackList_playlistId ON PlaylistTrackList ( playlistId );
CREATE INDEX music.index_PlaylistTrackList_trackId ON PlaylistTrackList ( trackId );

CREATE TABLE music.Preparelist ( [id] INTEGER, [title] TEXT , PRIMARY KEY ( [id] ) );
CREATE INDEX music.index_Preparelist_id ON Preparelist ( id );

CREATE TABLE music.PreparelistTrackList ( [playlistId] INTEGER  REFERENCES Preparelist ( id )  ON DELETE CASCADE, [trackId] INTEGER  REFERENCES Track ( id )  ON DELETE CASCADE, [trackIdInOriginDatabase] INTEGER , [databaseUuid] TEXT , [trackNumber] INTEGER );
CREATE INDEX music.index_PreparelistTrackList_playlistId ON PreparelistTrackList ( playlistId );
CREATE INDEX music.index_PreparelistTrackList_trackId ON PreparelistTrackList ( trackId );

CREATE TABLE music.Historylist ( [id] INTEGER, [title] TEXT , PRIMARY KEY ( [id] ) );
CREATE INDEX music.index_Historylist_id ON Historylist ( id );

CREATE TABLE music.HistorylistTrackList ( [historylistId] INTEGER  REFERENCES Historylist ( id )  ON DELETE CASCADE, [trackId] INTEGER  REFERENCES Track ( id )  ON DELETE CASCADE, [trackIdInOriginDatabase] INTEGER , [databaseUuid] TEXT , [date] INTEGER );
CREATE INDEX music.index_HistorylistTrackList_historylistId ON HistorylistTrackList ( historylistId );
CREATE INDEX music.index_HistorylistTrackList_trackId ON HistorylistTrackList ( trackId );
CREATE INDEX music.index_HistorylistTrackList_date ON HistorylistTrackList ( date );

CREATE TABLE music.Crate ( [id] INTEGER, [title] TEXT , [path] TEXT , PRIMARY KEY ( [id] ) );
CREATE INDEX music.index_Crate_id ON Crate ( id );
CREATE INDEX music.index_Crate_title ON Crate ( title );
CREATE INDEX music.index_Crate_path ON Crate ( path );

CREATE TABLE music.CrateParentList ( [crateOriginId] INTEGER  REFERENCES Crate ( id )  ON DELETE CASCADE, [crateParentId] INTEGER  REFERENCES Crate ( id )  ON DELETE CASCADE);
CREATE INDEX music.index_CrateParentList_crateOriginId ON CrateParentList ( crateOriginId );
CREATE INDEX music.index_CrateParentList_crateParentId ON CrateParentList ( crateParentId );

CREATE TABLE music.CrateTrackList ( [crateId] INTEGER  REFERENCES Crate ( id )  ON DELETE CASCADE, [trackId] INTEGER  REFERENCES Track ( id )  ON DELETE CASCADE);
CREATE INDEX music.index_CrateTrackList_crateId ON CrateTrackList ( crateId );
CREATE INDEX music.index_CrateTrackList_trackId ON CrateTrackList ( trackId );

CREATE TABLE music.CrateHierarchy ( [crateId] INTEGER  REFERENCES Crate ( id )  ON DELETE CASCADE, [crateIdChild] INTEGER  REFERENCES Crate ( id )  ON DELETE CASCADE);
CREATE INDEX music.index_CrateHierarchy_crateId ON CrateHierarchy ( crateId );
CREATE INDEX music.index_CrateHierarchy_crateIdChild ON CrateHierarchy ( crateIdChild );

CREATE TABLE music.AlbumArt ( [id] INTEGER, [hash] TEXT , [albumArt] BLOB , PRIMARY KEY ( [id] ) );
CREATE INDEX music.index_AlbumArt_id ON AlbumArt ( id );
CREATE INDEX music.index_AlbumArt_hash ON AlbumArt ( hash );

CREATE TABLE music.CopiedTrack ( [trackId] INTEGER  REFERENCES Track ( id )  ON DELETE CASCADE, [uuidOfSourceDatabase] TEXT , [idOfTrackInSourceDatabase] INTEGER , PRIMARY KEY ( [trackId] ) );
CREATE INDEX music.index_CopiedTrack_trackId ON CopiedTrack ( trackId );
"#;

/// DDL for the `perfdata` schema (attached from `p.db`).
pub const CREATE_PERFDATA: &str = r#"
CREATE TABLE perfdata.Information ( [id] INTEGER, [uuid] TEXT , [schemaVersionMajor] INTEGER , [schemaVersionMinor] INTEGER , [schemaVersionPatch] INTEGER , [currentPlayedIndiciator] INTEGER , PRIMARY KEY ( [id] ) );
CREATE INDEX perfdata.index_Information_id ON Information ( id );

CREATE TABLE perfdata.PerformanceData ( [id] INTEGER, [isAnalyzed] NUMERIC , [isRendered] NUMERIC , [trackData] BLOB , [highResolutionWaveFormData] BLOB , [overviewWaveFormData] BLOB , [beatData] BLOB , [quickCues] BLOB , [loops] BLOB , [hasSeratoValues] NUMERIC , PRIMARY KEY ( [id] ) );
CREATE INDEX perfdata.index_PerformanceData_id ON PerformanceData ( id );
"#;

/// Hard-coded `currentPlayedIndiciator` sentinel used by every v1 variant.
///
/// The format is not understood; this value is reproduced verbatim rather
/// than replaced with a scheme of our own (see §9 of the design notes).
pub const CURRENT_PLAYED_INDICATOR_FAKE_VALUE: i64 = 5_100_658_837_829_259_927;

pub const DEFAULT_ALBUM_ART_ROW: &str = r"INSERT INTO music.AlbumArt VALUES (1, '', NULL)";
pub const DEFAULT_HISTORYLIST_ROW: &str =
    r"INSERT INTO music.Historylist VALUES (1, 'History 1')";
pub const DEFAULT_PREPARELIST_ROW: &str =
    r"INSERT INTO music.Preparelist VALUES (1, 'Prepare')";
