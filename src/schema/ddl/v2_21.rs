// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Literal DDL for `2.21.0` through `2.21.2`: [`super::v2_20_3`] plus the
//! `Smartlist` table.
//!
//! The `Smartlist` table definition is grounded on the one carried by
//! `3.1.0` (the nearest variant whose `create()` body is fully available);
//! `2.21.x` is the generation this table was introduced in, and nothing
//! about its shape is documented as having changed before `3.1.0`.

pub const CREATE_SMARTLIST: &str = r#"
CREATE TABLE Smartlist ( listUuid TEXT NOT NULL PRIMARY KEY, title TEXT, parentPlaylistPath TEXT, nextPlaylistPath TEXT, nextListUuid TEXT, rules TEXT, lastEditTime DATETIME, CONSTRAINT C_NAME_UNIQUE_FOR_PARENT UNIQUE (title, parentPlaylistPath), CONSTRAINT C_NEXT_LIST_UNIQUE_FOR_PARENT UNIQUE (parentPlaylistPath, nextPlaylistPath, nextListUuid) );
"#;

pub use super::v2_20_3::CREATE as CREATE_BASE;
pub use super::v2_20_3::DEFAULT_ALBUM_ART_ROW;
