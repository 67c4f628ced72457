// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Literal `CREATE` DDL, grouped by the family of variants that share it at
//! the catalogue level (tables, views, indices). Trigger bodies may still
//! differ within a family; see each submodule's doc comment.

pub mod v1_base;
pub mod v1_list_era;
pub mod v1_mature;
pub mod v2_21;
pub mod v2_base;
pub mod v2_20_3;
pub mod v3;
