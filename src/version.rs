// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

/// A schema version triple, as stored in the `Information` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            major,
            minor,
            patch,
        } = self;
        write!(f, "{major}.{minor}.{patch}")
    }
}

/// On-disk layout selected by a schema variant's major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    /// Two-file `m.db`/`p.db` layout, major version 1.
    V1,
    /// Unified `Database2/m.db` layout, major versions 2 and 3.
    V2V3,
}

/// Whether the `(1, 18, 0)` sub-variant was probed from the desktop
/// application or from an on-player database.
///
/// The version triple alone is ambiguous; see [`SchemaVariant::probe_1_18_0`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subvariant1_18_0 {
    Desktop,
    OnPlayer,
}

/// The closed set of schema variants this crate can create, detect, and
/// verify.
///
/// Ordering follows release order; do not reorder, since the 1.18.0
/// sub-variants are otherwise indistinguishable in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SchemaVariant {
    V1_6_0,
    V1_7_1,
    V1_9_1,
    V1_11_1,
    V1_13_0,
    V1_13_1,
    V1_13_2,
    V1_15_0,
    V1_17_0,
    V1_18_0(Subvariant1_18_0),
    V2_18_0,
    V2_20_1,
    V2_20_2,
    V2_20_3,
    V2_21_0,
    V2_21_1,
    V2_21_2,
    V3_0_0,
    V3_0_1,
    V3_1_0,
}

impl SchemaVariant {
    /// All variants, in release order.
    pub const ALL: &'static [Self] = &[
        Self::V1_6_0,
        Self::V1_7_1,
        Self::V1_9_1,
        Self::V1_11_1,
        Self::V1_13_0,
        Self::V1_13_1,
        Self::V1_13_2,
        Self::V1_15_0,
        Self::V1_17_0,
        Self::V1_18_0(Subvariant1_18_0::Desktop),
        Self::V1_18_0(Subvariant1_18_0::OnPlayer),
        Self::V2_18_0,
        Self::V2_20_1,
        Self::V2_20_2,
        Self::V2_20_3,
        Self::V2_21_0,
        Self::V2_21_1,
        Self::V2_21_2,
        Self::V3_0_0,
        Self::V3_0_1,
        Self::V3_1_0,
    ];

    #[must_use]
    pub const fn version(self) -> SchemaVersion {
        let (major, minor, patch) = match self {
            Self::V1_6_0 => (1, 6, 0),
            Self::V1_7_1 => (1, 7, 1),
            Self::V1_9_1 => (1, 9, 1),
            Self::V1_11_1 => (1, 11, 1),
            Self::V1_13_0 => (1, 13, 0),
            Self::V1_13_1 => (1, 13, 1),
            Self::V1_13_2 => (1, 13, 2),
            Self::V1_15_0 => (1, 15, 0),
            Self::V1_17_0 => (1, 17, 0),
            Self::V1_18_0(_) => (1, 18, 0),
            Self::V2_18_0 => (2, 18, 0),
            Self::V2_20_1 => (2, 20, 1),
            Self::V2_20_2 => (2, 20, 2),
            Self::V2_20_3 => (2, 20, 3),
            Self::V2_21_0 => (2, 21, 0),
            Self::V2_21_1 => (2, 21, 1),
            Self::V2_21_2 => (2, 21, 2),
            Self::V3_0_0 => (3, 0, 0),
            Self::V3_0_1 => (3, 0, 1),
            Self::V3_1_0 => (3, 1, 0),
        };
        SchemaVersion {
            major,
            minor,
            patch,
        }
    }

    #[must_use]
    pub const fn generation(self) -> Generation {
        match self.version().major {
            1 => Generation::V1,
            _ => Generation::V2V3,
        }
    }

    /// Resolves a version triple to a variant.
    ///
    /// `(1, 18, 0)` requires `subvariant_1_18_0` since the triple alone is
    /// ambiguous (see [`Self::probe_1_18_0`]); it is ignored for every other
    /// triple. Returns `None` for an unrecognised triple: callers distinguish
    /// "recognised generation, wrong patch" (`Error::UnsupportedDatabase`)
    /// from "wholly unrecognised" (`Error::DatabaseInconsistency`) by first
    /// checking whether `major`/`minor` match a known variant.
    #[must_use]
    pub fn from_version(
        version: SchemaVersion,
        subvariant_1_18_0: Option<Subvariant1_18_0>,
    ) -> Option<Self> {
        let SchemaVersion {
            major,
            minor,
            patch,
        } = version;
        Some(match (major, minor, patch) {
            (1, 6, 0) => Self::V1_6_0,
            (1, 7, 1) => Self::V1_7_1,
            (1, 9, 1) => Self::V1_9_1,
            (1, 11, 1) => Self::V1_11_1,
            (1, 13, 0) => Self::V1_13_0,
            (1, 13, 1) => Self::V1_13_1,
            (1, 13, 2) => Self::V1_13_2,
            (1, 15, 0) => Self::V1_15_0,
            (1, 17, 0) => Self::V1_17_0,
            (1, 18, 0) => Self::V1_18_0(subvariant_1_18_0?),
            (2, 18, 0) => Self::V2_18_0,
            (2, 20, 1) => Self::V2_20_1,
            (2, 20, 2) => Self::V2_20_2,
            (2, 20, 3) => Self::V2_20_3,
            (2, 21, 0) => Self::V2_21_0,
            (2, 21, 1) => Self::V2_21_1,
            (2, 21, 2) => Self::V2_21_2,
            // Written out explicitly rather than as a fall-through `3, 0, _`
            // range: the source this was ported from relies on a missing
            // `break` to reject unknown 3.0.x patches, which only works by
            // accident for minor versions other than 0. Recognised variants
            // are listed one by one.
            (3, 0, 0) => Self::V3_0_0,
            (3, 0, 1) => Self::V3_0_1,
            (3, 1, 0) => Self::V3_1_0,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{SchemaVariant, SchemaVersion, Subvariant1_18_0};

    #[test]
    fn roundtrip_all_variants() {
        for &variant in SchemaVariant::ALL {
            let version = variant.version();
            let subvariant = match variant {
                SchemaVariant::V1_18_0(sub) => Some(sub),
                _ => None,
            };
            assert_eq!(
                SchemaVariant::from_version(version, subvariant).map(SchemaVariant::version),
                Some(version)
            );
        }
    }

    #[test]
    fn unknown_patch_in_known_generation_is_none() {
        assert!(
            SchemaVariant::from_version(
                SchemaVersion {
                    major: 3,
                    minor: 0,
                    patch: 99
                },
                None
            )
            .is_none()
        );
    }

    #[test]
    fn ambiguous_1_18_0_requires_subvariant() {
        let version = SchemaVersion {
            major: 1,
            minor: 18,
            patch: 0,
        };
        assert!(SchemaVariant::from_version(version, None).is_none());
        assert!(SchemaVariant::from_version(version, Some(Subvariant1_18_0::Desktop)).is_some());
    }
}
