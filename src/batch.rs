// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Batch maintenance jobs that scan and rewrite many rows at once, outside
//! the per-entity CRUD surface in the rest of the crate. Gated behind the
//! `batch` feature since these jobs need a multi-threaded tokio runtime
//! (`block_in_place` for CPU-bound image work).

mod reset_album_art;
pub use self::reset_album_art::reset_album_art;

mod shrink_album_art;
pub use self::shrink_album_art::shrink_album_art;

/// Result of a batch maintenance job.
///
/// A single row failing does not abort the job; failures accumulate in
/// [`Self::failed`] while the job keeps going. [`Self::abort`] is for the
/// rarer case of an error fatal to the whole job, such as a broken cursor.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: u64,
    pub skipped: u64,
    pub failed: Vec<Box<dyn std::error::Error + Send + Sync>>,
}

impl BatchOutcome {
    pub(crate) fn abort(mut self, error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        self.failed.push(error);
        self
    }
}
