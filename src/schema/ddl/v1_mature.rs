// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Literal DDL for the mature v1 "`List`" polymorphism schema, introduced in
//! `1.17.0` and carried forward unchanged (at the catalogue level) into both
//! `1.18.0` sub-variants. `1.18.0` differs only in the declared column type
//! of `Track.isExternalTrack` (`NUMERIC` on desktop, a distinct affinity on
//! on-player databases) — see [`isexternaltrack_declared_type`].

/// `music` schema DDL, with `{isExternalTrack}` as a format placeholder for
/// the `1.18.0` desktop/on-player split.
const CREATE_MUSIC_TEMPLATE: &str = r#"
CREATE TABLE music.Track ( [id] INTEGER PRIMARY KEY AUTOINCREMENT, [playOrder] INTEGER, [length] INTEGER, [lengthCalculated] INTEGER, [bpm] INTEGER, [year] INTEGER, [path] TEXT, [filename] TEXT, [bitrate] INTEGER, [bpmAnalyzed] REAL, [trackType] INTEGER, [isExternalTrack] {isExternalTrack}, [uuidOfExternalDatabase] TEXT, [idTrackInExternalDatabase] INTEGER, [idAlbumArt] INTEGER, [fileBytes] INTEGER, [pdbImportKey] INTEGER, [uri] TEXT, CONSTRAINT C_path UNIQUE ([path]), FOREIGN KEY ( [idAlbumArt] ) REFERENCES AlbumArt ( [id] )  ON DELETE RESTRICT);
CREATE TABLE music.Information ( [id] INTEGER PRIMARY KEY AUTOINCREMENT, [uuid] TEXT, [schemaVersionMajor] INTEGER, [schemaVersionMinor] INTEGER, [schemaVersionPatch] INTEGER, [currentPlayedIndiciator] INTEGER, [lastRekordBoxLibraryImportReadCounter] INTEGER);
CREATE TABLE music.MetaData ( [id] INTEGER, [type] INTEGER, [text] TEXT, PRIMARY KEY ( [id], [type] ) , FOREIGN KEY ( [id] ) REFERENCES Track ( [id] )  ON DELETE CASCADE);
CREATE TABLE music.MetaDataInteger ( [id] INTEGER, [type] INTEGER, [value] INTEGER, PRIMARY KEY ( [id], [type] ) , FOREIGN KEY ( [id] ) REFERENCES Track ( [id] )  ON DELETE CASCADE);
CREATE TABLE music.AlbumArt ( [id] INTEGER PRIMARY KEY AUTOINCREMENT, [hash] TEXT, [albumArt] BLOB);
CREATE TABLE music.CopiedTrack ( [trackId] INTEGER, [uuidOfSourceDatabase] TEXT, [idOfTrackInSourceDatabase] INTEGER, PRIMARY KEY ( [trackId] ) , FOREIGN KEY ( [trackId] ) REFERENCES Track ( [id] )  ON DELETE CASCADE);
CREATE TABLE music.List ( [id] INTEGER, [type] INTEGER, [title] TEXT, [path] TEXT, [isFolder] NUMERIC, [trackCount] INTEGER, [ordering] INTEGER, [isExplicitlyExported] NUMERIC DEFAULT 1, PRIMARY KEY ( [id], [type] ) );
CREATE TABLE music.ListTrackList ( [id] INTEGER PRIMARY KEY AUTOINCREMENT, [listId] INTEGER, [listType] INTEGER, [trackId] INTEGER, [trackIdInOriginDatabase] INTEGER, [databaseUuid] TEXT, [trackNumber] INTEGER, FOREIGN KEY ( [listId], [listType] ) REFERENCES List ( [id], [type] )  ON DELETE CASCADE, FOREIGN KEY ( [trackId] ) REFERENCES Track ( [id] )  ON DELETE CASCADE);
CREATE TABLE music.ListHierarchy ( [listId] INTEGER, [listType] INTEGER, [listIdChild] INTEGER, [listTypeChild] INTEGER, FOREIGN KEY ( [listId], [listType] ) REFERENCES List ( [id], [type] )  ON DELETE CASCADE, FOREIGN KEY ( [listIdChild], [listTypeChild] ) REFERENCES List ( [id], [type] )  ON DELETE CASCADE);
CREATE TABLE music.ListParentList ( [listOriginId] INTEGER, [listOriginType] INTEGER, [listParentId] INTEGER, [listParentType] INTEGER, FOREIGN KEY ( [listOriginId], [listOriginType] ) REFERENCES List ( [id], [type] )  ON DELETE CASCADE, FOREIGN KEY ( [listParentId], [listParentType] ) REFERENCES List ( [id], [type] )  ON DELETE CASCADE);
CREATE TABLE music.Pack ( [id] INTEGER PRIMARY KEY AUTOINCREMENT, [packId] TEXT, [changeLogDatabaseUuid] TEXT, [changeLogId] INTEGER);
CREATE TABLE music.ChangeLog ( [id] INTEGER PRIMARY KEY AUTOINCREMENT, [itemId] INTEGER);
CREATE INDEX music.index_Track_id ON Track ( id );
CREATE INDEX music.index_Track_path ON Track ( path );
CREATE INDEX music.index_Track_filename ON Track ( filename );
CREATE INDEX music.index_Track_isExternalTrack ON Track ( isExternalTrack );
CREATE INDEX music.index_Track_uuidOfExternalDatabase ON Track ( uuidOfExternalDatabase );
CREATE INDEX music.index_Track_idTrackInExternalDatabase ON Track ( idTrackInExternalDatabase );
CREATE INDEX music.index_Track_idAlbumArt ON Track ( idAlbumArt );
CREATE INDEX music.index_Track_uri ON Track ( uri );
CREATE TRIGGER music.trigger_after_insert_Track AFTER INSERT ON Track WHEN NEW.id <= (SELECT seq FROM sqlite_sequence WHERE name = 'Track') BEGIN SELECT RAISE(ABORT, 'Recycling deleted track id''s are not allowed'); END;
CREATE TRIGGER music.trigger_before_update_Track BEFORE UPDATE ON Track WHEN NEW.id <> OLD.id BEGIN SELECT RAISE(ABORT, 'Changing track id''s are not allowed'); END;
CREATE TRIGGER music.trigger_after_delete_Track AFTER DELETE ON Track WHEN OLD.id > COALESCE((SELECT MAX(id) FROM Track), 0) BEGIN DELETE FROM Track WHERE path IS NULL; INSERT INTO Track(id) VALUES(NULL); END;
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
CREATE INDEX music.index_List_ordering ON List ( ordering );
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
CREATE TRIGGER music.trigger_delete_Playlist INSTEAD OF DELETE ON Playlist FOR EACH ROW BEGIN   DELETE FROM List WHERE type = 1 AND OLD.id = id AND OLD.title = title; END;
CREATE TRIGGER music.trigger_update_Playlist INSTEAD OF UPDATE ON Playlist FOR EACH ROW BEGIN   UPDATE List SET id = NEW.id, title = NEW.title   WHERE  id = OLD.id AND title = OLD.title   ;  END;
CREATE TRIGGER music.trigger_delete_Historylist INSTEAD OF DELETE ON Historylist FOR EACH ROW BEGIN   DELETE FROM List WHERE type = 2 AND OLD.id = id AND OLD.title = title; END;
CREATE TRIGGER music.trigger_update_Historylist INSTEAD OF UPDATE ON Historylist FOR EACH ROW BEGIN   UPDATE List SET id = NEW.id, title = NEW.title   WHERE  id = OLD.id AND title = OLD.title   ;  END;
CREATE TRIGGER music.trigger_delete_Preparelist INSTEAD OF DELETE ON Preparelist FOR EACH ROW BEGIN   DELETE FROM List WHERE type = 3 AND OLD.id = id AND OLD.title = title; END;
CREATE TRIGGER music.trigger_update_Preparelist INSTEAD OF UPDATE ON Preparelist FOR EACH ROW BEGIN   UPDATE List SET id = NEW.id, title = NEW.title   WHERE  id = OLD.id AND title = OLD.title   ;  END;
CREATE TRIGGER music.trigger_delete_Crate INSTEAD OF DELETE ON Crate FOR EACH ROW BEGIN   DELETE FROM List WHERE type = 4 AND OLD.id = id AND OLD.title = title AND OLD.path = path; END;
CREATE TRIGGER music.trigger_update_Crate INSTEAD OF UPDATE ON Crate FOR EACH ROW BEGIN   UPDATE List SET id = NEW.id, title = NEW.title, path = NEW.path   WHERE  id = OLD.id AND title = OLD.title AND path = OLD.path   ;  END;
CREATE TRIGGER music.trigger_insert_Playlist INSTEAD OF INSERT ON Playlist FOR EACH ROW BEGIN   INSERT INTO List ( id, type, title, path, isFolder, trackCount, ordering )    VALUES ( NEW.id, 1, NEW.title, NEW.title || ";", 0, 0, NEW.id ) ;  INSERT INTO ListParentList ( listOriginId, listOriginType, listParentId, listParentType )   VALUES ( NEW.id, 1,            NEW.id, 1 ) ; END;
CREATE TRIGGER music.trigger_insert_Historylist INSTEAD OF INSERT ON Historylist FOR EACH ROW BEGIN   INSERT INTO List ( id, type, title, path, isFolder, trackCount, ordering )    VALUES ( NEW.id, 2, NEW.title, NEW.title || ";", 0, 0, NEW.id ) ;  INSERT INTO ListParentList ( listOriginId, listOriginType, listParentId, listParentType )   VALUES ( NEW.id, 2,            NEW.id, 2 ) ; END;
CREATE TRIGGER music.trigger_insert_Preparelist INSTEAD OF INSERT ON Preparelist FOR EACH ROW BEGIN   INSERT INTO List ( id, type, title, path, isFolder, trackCount, ordering )    VALUES ( NEW.id, 3, NEW.title, NEW.title || ";", 0, 0, NEW.id ) ;  INSERT INTO ListParentList ( listOriginId, listOriginType, listParentId, listParentType )   VALUES ( NEW.id, 3,            NEW.id, 3 ) ; END;
CREATE TRIGGER music.trigger_insert_Crate INSTEAD OF INSERT ON Crate FOR EACH ROW BEGIN   INSERT INTO List ( id, type, title, path, isFolder, trackCount, ordering )    VALUES ( NEW.id, 4, NEW.title, NEW.path, 0, 0, NEW.id ) ; END;
CREATE TRIGGER music.trigger_insert_order_update_List AFTER INSERT ON List FOR EACH ROW WHEN NEW.ordering IS NULL BEGIN    UPDATE List SET ordering = (SELECT IFNULL(MAX(ordering) + 1, 1) FROM List )     WHERE id = NEW.id AND type = NEW.type; END;
CREATE TRIGGER music.trigger_after_insert_List AFTER INSERT ON List FOR EACH ROW BEGIN   UPDATE List   SET trackCount = 0    WHERE id = NEW.id AND type = NEW.type AND trackCount IS NULL   ;END;
CREATE TRIGGER music.trigger_track_added_to_ListTrackList AFTER INSERT ON ListTrackList FOR EACH ROW BEGIN UPDATE List SET trackCount = trackCount + 1 WHERE id = NEW.listId AND type = NEW.listType; END;
CREATE TRIGGER music.trigger_track_removed_from_ListTrackList AFTER DELETE ON ListTrackList FOR EACH ROW BEGIN UPDATE List SET trackCount = trackCount - 1 WHERE id = OLD.listId AND type = OLD.listType; END;
CREATE TRIGGER music.trigger_delete_PlaylistTrackList INSTEAD OF DELETE ON PlaylistTrackList FOR EACH ROW BEGIN   DELETE FROM ListTrackList WHERE listType = 1 AND OLD.playlistId = listId AND OLD.trackId = trackId AND OLD.trackIdInOriginDatabase = trackIdInOriginDatabase AND OLD.databaseUuid = databaseUuid AND OLD.trackNumber = trackNumber; END;
CREATE TRIGGER music.trigger_update_PlaylistTrackList INSTEAD OF UPDATE ON PlaylistTrackList FOR EACH ROW BEGIN   UPDATE ListTrackList SET listId = NEW.playlistId , trackId = NEW.trackId , trackIdInOriginDatabase = NEW.trackIdInOriginDatabase , databaseUuid = NEW.databaseUuid , trackNumber = NEW.trackNumber   WHERE listType = 1 AND OLD.playlistId = listId AND OLD.trackId = trackId AND OLD.trackIdInOriginDatabase = trackIdInOriginDatabase AND OLD.databaseUuid = databaseUuid AND OLD.trackNumber = trackNumber ; END;
CREATE TRIGGER music.trigger_insert_PlaylistTrackList INSTEAD OF INSERT ON PlaylistTrackList FOR EACH ROW BEGIN   INSERT INTO ListTrackList ( listId, listType, trackId, trackIdInOriginDatabase, databaseUuid, trackNumber )                     SELECT NEW.playlistId, 1, NEW.trackId, NEW.trackIdInOriginDatabase, NEW.databaseUuid, NEW.trackNumber                    FROM List AS l WHERE l.id = NEW.playlistId AND l.type = 1 AND l.isFolder = 0 ; END;
CREATE TRIGGER music.trigger_delete_HistorylistTrackList INSTEAD OF DELETE ON HistorylistTrackList FOR EACH ROW BEGIN   DELETE FROM ListTrackList WHERE listType = 2 AND OLD.historylistId = listId AND OLD.trackId = trackId AND OLD.trackIdInOriginDatabase = trackIdInOriginDatabase AND OLD.databaseUuid = databaseUuid; END;
CREATE TRIGGER music.trigger_update_HistorylistTrackList INSTEAD OF UPDATE ON HistorylistTrackList FOR EACH ROW BEGIN   UPDATE ListTrackList SET listId = NEW.historylistId , trackId = NEW.trackId , trackIdInOriginDatabase = NEW.trackIdInOriginDatabase , databaseUuid = NEW.databaseUuid   WHERE listType = 2 AND OLD.historylistId = listId AND OLD.trackId = trackId AND OLD.trackIdInOriginDatabase = trackIdInOriginDatabase AND OLD.databaseUuid = databaseUuid ; END;
CREATE TRIGGER music.trigger_insert_HistorylistTrackList INSTEAD OF INSERT ON HistorylistTrackList FOR EACH ROW BEGIN   INSERT INTO ListTrackList ( listId, listType, trackId, trackIdInOriginDatabase, databaseUuid, trackNumber )                     SELECT NEW.historylistId, 2, NEW.trackId, NEW.trackIdInOriginDatabase, NEW.databaseUuid, 0                    FROM List AS l WHERE l.id = NEW.historylistId AND l.type = 2 AND l.isFolder = 0 ; END;
CREATE TRIGGER music.trigger_delete_PreparelistTrackList INSTEAD OF DELETE ON PreparelistTrackList FOR EACH ROW BEGIN   DELETE FROM ListTrackList WHERE listType = 3 AND OLD.playlistId = listId AND OLD.trackId = trackId AND OLD.trackIdInOriginDatabase = trackIdInOriginDatabase AND OLD.databaseUuid = databaseUuid AND OLD.trackNumber = trackNumber; END;
CREATE TRIGGER music.trigger_update_PreparelistTrackList INSTEAD OF UPDATE ON PreparelistTrackList FOR EACH ROW BEGIN   UPDATE ListTrackList SET listId = NEW.playlistId , trackId = NEW.trackId , trackIdInOriginDatabase = NEW.trackIdInOriginDatabase , databaseUuid = NEW.databaseUuid , trackNumber = NEW.trackNumber   WHERE listType = 3 AND OLD.playlistId = listId AND OLD.trackId = trackId AND OLD.trackIdInOriginDatabase = trackIdInOriginDatabase AND OLD.databaseUuid = databaseUuid AND OLD.trackNumber = trackNumber ; END;
CREATE TRIGGER music.trigger_insert_PreparelistTrackList INSTEAD OF INSERT ON PreparelistTrackList FOR EACH ROW BEGIN   INSERT INTO ListTrackList ( listId, listType, trackId, trackIdInOriginDatabase, databaseUuid, trackNumber )                     SELECT NEW.playlistId, 3, NEW.trackId, NEW.trackIdInOriginDatabase, NEW.databaseUuid, NEW.trackNumber                    FROM List AS l WHERE l.id = NEW.playlistId AND l.type = 3 AND l.isFolder = 0 ; END;
CREATE TRIGGER music.trigger_delete_CrateTrackList INSTEAD OF DELETE ON CrateTrackList FOR EACH ROW BEGIN   DELETE FROM ListTrackList WHERE listType = 4 AND OLD.crateId = listId AND OLD.trackId = trackId; END;
CREATE TRIGGER music.trigger_insert_CrateTrackList INSTEAD OF INSERT ON CrateTrackList FOR EACH ROW BEGIN   INSERT INTO ListTrackList ( listId, listType, trackId, trackIdInOriginDatabase, databaseUuid, trackNumber )    VALUES ( NEW.crateId, 4, NEW.trackId, 0, 0, 0 ) ; END;
CREATE INDEX music.index_ListHierarchy_listId ON ListHierarchy ( listId );
CREATE INDEX music.index_ListHierarchy_listType ON ListHierarchy ( listType );
CREATE INDEX music.index_ListHierarchy_listIdChild ON ListHierarchy ( listIdChild );
CREATE INDEX music.index_ListHierarchy_listTypeChild ON ListHierarchy ( listTypeChild );
CREATE VIEW music.CrateHierarchy AS SELECT listId AS crateId, listIdChild AS crateIdChild FROM ListHierarchy WHERE listType = 4 AND listTypeChild = 4;
CREATE TRIGGER music.trigger_delete_CrateHierarchy INSTEAD OF DELETE ON CrateHierarchy FOR EACH ROW BEGIN   DELETE FROM ListHierarchy WHERE listId = OLD.crateId AND listType = 4 AND listIdChild = OLD.crateIdChild AND listTypeChild = 4 ;  END;
CREATE TRIGGER music.trigger_insert_CrateHierarchy INSTEAD OF INSERT ON CrateHierarchy FOR EACH ROW BEGIN   INSERT INTO ListHierarchy ( listId, listType, listIdChild, listTypeChild )    VALUES ( NEW.crateId, 4, NEW.crateIdChild, 4 ) ; END;
CREATE INDEX music.index_ListParentList_listOriginId ON ListParentList ( listOriginId );
CREATE INDEX music.index_ListParentList_listOriginType ON ListParentList ( listOriginType );
CREATE INDEX music.index_ListParentList_listParentId ON ListParentList ( listParentId );
CREATE INDEX music.index_ListParentList_listParentType ON ListParentList ( listParentType );
CREATE VIEW music.CrateParentList AS SELECT listOriginId AS crateOriginId, listParentId AS crateParentId FROM ListParentList WHERE listOriginType = 4 AND listParentType = 4;
CREATE TRIGGER music.trigger_delete_CrateParentList INSTEAD OF DELETE ON CrateParentList FOR EACH ROW BEGIN   DELETE FROM ListParentList WHERE OLD.crateOriginId = listOriginId AND listOriginType = 4 AND OLD.crateParentId = listParentId AND listParentType = 4; END;
CREATE TRIGGER music.trigger_insert_CrateParentList INSTEAD OF INSERT ON CrateParentList FOR EACH ROW BEGIN   INSERT INTO ListParentList ( listOriginId, listOriginType, listParentId, listParentType )    VALUES ( NEW.crateOriginId, 4, NEW.crateParentId, 4 ) ; END;
CREATE TRIGGER music.trigger_after_update_Track AFTER UPDATE ON Track FOR EACH ROW BEGIN INSERT INTO ChangeLog (itemId) VALUES(NEW.id); END;
CREATE TRIGGER music.trigger_after_update_MetaData AFTER UPDATE ON MetaData FOR EACH ROW BEGIN INSERT INTO ChangeLog (itemId) VALUES(NEW.id); END;
CREATE TRIGGER music.trigger_after_update_MetaDataInteger AFTER UPDATE ON MetaDataInteger FOR EACH ROW BEGIN INSERT INTO ChangeLog (itemId) VALUES(NEW.id); END;
"#;

pub const CREATE_PERFDATA: &str = r#"
CREATE TABLE perfdata.PerformanceData ( [id] INTEGER, [isAnalyzed] NUMERIC, [isRendered] NUMERIC, [trackData] BLOB, [highResolutionWaveFormData] BLOB, [overviewWaveFormData] BLOB, [beatData] BLOB, [quickCues] BLOB, [loops] BLOB, [hasSeratoValues] NUMERIC, [hasRekordboxValues] NUMERIC, [hasTraktorValues] NUMERIC, PRIMARY KEY ( [id] ) );
CREATE TABLE perfdata.Information ( [id] INTEGER PRIMARY KEY AUTOINCREMENT, [uuid] TEXT, [schemaVersionMajor] INTEGER, [schemaVersionMinor] INTEGER, [schemaVersionPatch] INTEGER, [currentPlayedIndiciator] INTEGER, [lastRekordBoxLibraryImportReadCounter] INTEGER);
CREATE TABLE perfdata.ChangeLog ( [id] INTEGER PRIMARY KEY AUTOINCREMENT, [itemId] INTEGER);
CREATE INDEX perfdata.index_PerformanceData_id ON PerformanceData ( id );
CREATE INDEX perfdata.index_Information_id ON Information ( id );
CREATE TRIGGER perfdata.trigger_after_update_PerformanceData AFTER UPDATE ON PerformanceData FOR EACH ROW BEGIN INSERT INTO ChangeLog (itemId) VALUES(NEW.id); END;
"#;

pub const CURRENT_PLAYED_INDICATOR_FAKE_VALUE: i64 = 5_100_658_837_829_259_927;

pub const DEFAULT_ALBUM_ART_ROW: &str = r"INSERT INTO music.AlbumArt VALUES (1, '', NULL)";
pub const DEFAULT_HISTORYLIST_ROW: &str =
    r"INSERT INTO music.Historylist VALUES (1, 'History 1')";
pub const DEFAULT_PREPARELIST_ROW: &str =
    r"INSERT INTO music.Preparelist VALUES (1, 'Prepare')";

/// The declared type of `Track.isExternalTrack`, distinguishing the
/// `1.18.0` desktop application from an on-player database. The triple
/// alone cannot tell them apart; see [`crate::schema::detect`].
#[must_use]
pub const fn isexternaltrack_declared_type(is_desktop: bool) -> &'static str {
    if is_desktop { "NUMERIC" } else { "BOOLEAN" }
}

#[must_use]
pub fn create_music_ddl(is_desktop: bool) -> String {
    CREATE_MUSIC_TEMPLATE.replace(
        "{isExternalTrack}",
        isexternaltrack_declared_type(is_desktop),
    )
}
