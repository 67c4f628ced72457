// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Per-column setters below mirror `performance_data_table.cpp`'s
//! `get_column`/`set_column` helpers: one UPDATE per column, reporting
//! `Error::RowIdError` when no track owned the row.

use futures_util::stream::BoxStream;
use sqlx::{FromRow, SqliteConnection, SqliteExecutor};

use crate::blob::{BeatDataBlob, DecodeError, OverviewWaveformBlob, QuickCuesBlob, TrackDataBlob};
use crate::{Entity, Error, TrackId};

#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct PerformanceData {
    pub track_id: TrackId,
    pub track_data: Vec<u8>,
    pub overview_wave_form_data: Vec<u8>,
    pub beat_data: Vec<u8>,
    pub quick_cues: Vec<u8>,
    pub loops: Vec<u8>,
    pub third_party_source_id: Option<i64>,
    pub active_on_load_loops: i64,
}

impl PerformanceData {
    /// Decodes the `trackData` column.
    pub fn track_data(&self) -> Result<TrackDataBlob, DecodeError> {
        TrackDataBlob::decode(&self.track_data)
    }

    /// Decodes the `overviewWaveFormData` column.
    pub fn overview_waveform(&self) -> Result<OverviewWaveformBlob, DecodeError> {
        OverviewWaveformBlob::decode(&self.overview_wave_form_data)
    }

    /// Decodes the `beatData` column.
    pub fn beat_data(&self) -> Result<BeatDataBlob, DecodeError> {
        BeatDataBlob::decode(&self.beat_data)
    }

    /// Decodes the `quickCues` column.
    pub fn quick_cues(&self) -> Result<QuickCuesBlob, DecodeError> {
        QuickCuesBlob::decode(&self.quick_cues)
    }

    /// Decodes the `loops` column.
    pub fn loops(&self) -> Result<crate::blob::LoopsBlob, DecodeError> {
        crate::blob::LoopsBlob::decode(&self.loops)
    }

    /// Fetches all [`PerformanceData`]s asynchronously.
    ///
    /// Unfiltered and in no particular order.
    #[must_use]
    pub fn fetch_all<'a>(
        executor: impl SqliteExecutor<'a> + 'a,
    ) -> BoxStream<'a, sqlx::Result<PerformanceData>> {
        sqlx::query_as(r"SELECT * FROM PerformanceData").fetch(executor)
    }

    /// Loads the performance data row for `track_id`.
    ///
    /// Returns `Ok(None)` if the track has no performance data row. Every
    /// schema generation keys this table by `trackId`, not a standalone row
    /// id: v1 stores it in a separate `perfdata.PerformanceData` table, v2
    /// exposes it as a view over `Track` through INSTEAD-OF triggers, and v3
    /// is a real table with `trackId` as its own primary key — none of them
    /// carry a distinct `id` column.
    pub async fn try_load(
        executor: impl SqliteExecutor<'_>,
        track_id: TrackId,
    ) -> sqlx::Result<Option<PerformanceData>> {
        sqlx::query_as(r"SELECT * FROM PerformanceData WHERE trackId=?1")
            .bind(track_id)
            .fetch_optional(executor)
            .await
    }

    /// Delete all records with no associated track.
    pub async fn delete_orphaned(executor: impl SqliteExecutor<'_>) -> sqlx::Result<u64> {
        let result =
            sqlx::query(r"DELETE FROM PerformanceData WHERE trackId NOT IN (SELECT id FROM Track)")
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }

    /// All track ids with a performance data row.
    #[must_use]
    pub fn all_track_ids<'a>(
        executor: impl SqliteExecutor<'a> + 'a,
    ) -> BoxStream<'a, sqlx::Result<TrackId>> {
        sqlx::query_scalar(r"SELECT trackId FROM PerformanceData").fetch(executor)
    }

    fn row_id_error(track_id: TrackId) -> Error {
        Error::RowIdError {
            entity: Entity::PerformanceData,
            message: format!("no performance data row for track {track_id}"),
        }
    }

    /// Overwrites the `trackData` blob.
    pub async fn set_track_data(conn: &mut SqliteConnection, track_id: TrackId, track_data: &[u8]) -> crate::Result<()> {
        let result = sqlx::query(r"UPDATE PerformanceData SET trackData=?1 WHERE trackId=?2")
            .bind(track_data)
            .bind(track_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Self::row_id_error(track_id));
        }
        Ok(())
    }

    /// Overwrites the `overviewWaveFormData` blob.
    pub async fn set_overview_waveform_data(
        conn: &mut SqliteConnection,
        track_id: TrackId,
        overview_wave_form_data: &[u8],
    ) -> crate::Result<()> {
        let result = sqlx::query(r"UPDATE PerformanceData SET overviewWaveFormData=?1 WHERE trackId=?2")
            .bind(overview_wave_form_data)
            .bind(track_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Self::row_id_error(track_id));
        }
        Ok(())
    }

    /// Overwrites the `beatData` blob.
    pub async fn set_beat_data(conn: &mut SqliteConnection, track_id: TrackId, beat_data: &[u8]) -> crate::Result<()> {
        let result = sqlx::query(r"UPDATE PerformanceData SET beatData=?1 WHERE trackId=?2")
            .bind(beat_data)
            .bind(track_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Self::row_id_error(track_id));
        }
        Ok(())
    }

    /// Overwrites the `quickCues` blob.
    pub async fn set_quick_cues(conn: &mut SqliteConnection, track_id: TrackId, quick_cues: &[u8]) -> crate::Result<()> {
        let result = sqlx::query(r"UPDATE PerformanceData SET quickCues=?1 WHERE trackId=?2")
            .bind(quick_cues)
            .bind(track_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Self::row_id_error(track_id));
        }
        Ok(())
    }

    /// Overwrites the `loops` blob.
    pub async fn set_loops(conn: &mut SqliteConnection, track_id: TrackId, loops: &[u8]) -> crate::Result<()> {
        let result = sqlx::query(r"UPDATE PerformanceData SET loops=?1 WHERE trackId=?2")
            .bind(loops)
            .bind(track_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Self::row_id_error(track_id));
        }
        Ok(())
    }

    /// Sets the `thirdPartySourceId` column.
    pub async fn set_third_party_source_id(
        conn: &mut SqliteConnection,
        track_id: TrackId,
        third_party_source_id: Option<i64>,
    ) -> crate::Result<()> {
        let result = sqlx::query(r"UPDATE PerformanceData SET thirdPartySourceId=?1 WHERE trackId=?2")
            .bind(third_party_source_id)
            .bind(track_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Self::row_id_error(track_id));
        }
        Ok(())
    }

    /// Sets the `activeOnLoadLoops` column.
    pub async fn set_active_on_load_loops(
        conn: &mut SqliteConnection,
        track_id: TrackId,
        active_on_load_loops: i64,
    ) -> crate::Result<()> {
        let result = sqlx::query(r"UPDATE PerformanceData SET activeOnLoadLoops=?1 WHERE trackId=?2")
            .bind(active_on_load_loops)
            .bind(track_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(Self::row_id_error(track_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sqlx::Connection as _;

    use super::PerformanceData;
    use crate::schema::SchemaCreatorValidator as _;
    use crate::track::Track;
    use crate::version::SchemaVariant;

    async fn unified_conn() -> sqlx::SqliteConnection {
        let mut conn = sqlx::SqliteConnection::connect("sqlite::memory:").await.unwrap();
        SchemaVariant::V3_1_0.creator_validator().create(&mut conn).await.unwrap();
        conn
    }

    #[tokio::test]
    async fn set_track_data_on_missing_row_reports_row_id_error() {
        let mut conn = unified_conn().await;
        let track_id = Track::add(&mut conn, "../Music/track.mp3").await.unwrap();
        assert!(PerformanceData::try_load(&mut conn, track_id).await.unwrap().is_some());
        PerformanceData::set_track_data(&mut conn, track_id, b"abc").await.unwrap();
        let row = PerformanceData::try_load(&mut conn, track_id).await.unwrap().unwrap();
        assert_eq!(row.track_data, b"abc");
    }

    #[tokio::test]
    async fn set_beat_data_on_missing_track_reports_row_id_error() {
        let mut conn = unified_conn().await;
        let err = PerformanceData::set_beat_data(&mut conn, crate::TrackId::INVALID_MIN_EXCLUSIVE, b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::RowIdError { entity: crate::Entity::PerformanceData, .. }));
    }
}
