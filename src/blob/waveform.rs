// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use super::{Cursor, DecodeError};
use crate::version::Generation;

/// Computes `(entries, samples_per_entry)` for the fixed-size overview
/// waveform.
///
/// At most 1024 entries. When the track is long enough that one entry
/// would span more than one sample, `samples_per_entry` is
/// `sample_count / 1024`; otherwise every sample gets its own entry.
#[must_use]
pub fn calculate_overview_waveform_extents(sample_count: u64, _sample_rate: f64) -> (u64, u64) {
    if sample_count == 0 {
        return (0, 0);
    }
    let samples_per_entry = sample_count / 1024;
    if samples_per_entry >= 1 {
        (1024, samples_per_entry)
    } else {
        (sample_count, 1)
    }
}

/// Computes `(entries, samples_per_entry)` for the high-resolution
/// waveform.
///
/// `samples_per_entry` is a function of sample rate alone (about 420
/// entries/second at 44.1 kHz, 456 at 48 kHz); `entries` then covers the
/// whole track, rounding up so the last entry may be partially filled.
#[must_use]
pub fn calculate_high_resolution_waveform_extents(sample_count: u64, sample_rate: f64) -> (u64, u64) {
    let samples_per_entry = (sample_rate * 0.0095).round().max(1.0) as u64;
    let entries = sample_count.div_ceil(samples_per_entry.max(1));
    (entries, samples_per_entry)
}

/// One point of the fixed-size overview waveform: low/mid/high band
/// levels, 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WaveformPoint {
    pub low: u8,
    pub mid: u8,
    pub high: u8,
}

/// Decoded `PerformanceData.overviewWaveFormData`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverviewWaveformBlob {
    pub points: Vec<WaveformPoint>,
}

impl OverviewWaveformBlob {
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.points.len() * 3);
        super::write_u32(&mut buf, self.points.len() as u32);
        for point in &self.points {
            buf.push(point.low);
            buf.push(point.mid);
            buf.push(point.high);
        }
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = Cursor::new(bytes);
        let count = cursor.read_u32()? as usize;
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            points.push(WaveformPoint {
                low: cursor.read_u8()?,
                mid: cursor.read_u8()?,
                high: cursor.read_u8()?,
            });
        }
        cursor.finish()?;
        Ok(Self { points })
    }
}

/// A single band's level, with an opacity carried only in the v1
/// (legacy, two-file) layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WaveformBand {
    pub value: u8,
    pub opacity: Option<u8>,
}

/// One entry of the high-resolution waveform: low/mid/high bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighResolutionWaveformEntry {
    pub low: WaveformBand,
    pub mid: WaveformBand,
    pub high: WaveformBand,
}

/// Decoded `PerformanceData.beatData`-adjacent high-resolution waveform
/// blob.
///
/// `generation` selects the per-entry layout: [`Generation::V1`] entries
/// carry an opacity byte alongside each band's value; [`Generation::V2V3`]
/// entries drop it, matching §4.6's "from v2 onward opacity is dropped".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighResolutionWaveformBlob {
    pub generation: Generation,
    pub entries: Vec<HighResolutionWaveformEntry>,
}

impl HighResolutionWaveformBlob {
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(match self.generation {
            Generation::V1 => 1,
            Generation::V2V3 => 2,
        });
        super::write_u32(&mut buf, self.entries.len() as u32);
        let has_opacity = self.generation == Generation::V1;
        for entry in &self.entries {
            for band in [entry.low, entry.mid, entry.high] {
                buf.push(band.value);
                if has_opacity {
                    buf.push(band.opacity.unwrap_or(0xFF));
                }
            }
        }
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = Cursor::new(bytes);
        let generation = match cursor.read_u8()? {
            1 => Generation::V1,
            2 => Generation::V2V3,
            _ => return Err(DecodeError::invalid("waveform generation tag")),
        };
        let has_opacity = generation == Generation::V1;
        let count = cursor.read_u32()? as usize;
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let mut band = || -> Result<WaveformBand, DecodeError> {
                let value = cursor.read_u8()?;
                let opacity = has_opacity.then(|| cursor.read_u8()).transpose()?;
                Ok(WaveformBand { value, opacity })
            };
            entries.push(HighResolutionWaveformEntry {
                low: band()?,
                mid: band()?,
                high: band()?,
            });
        }
        cursor.finish()?;
        Ok(Self { generation, entries })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        HighResolutionWaveformBlob, HighResolutionWaveformEntry, OverviewWaveformBlob, WaveformBand,
        WaveformPoint, calculate_high_resolution_waveform_extents, calculate_overview_waveform_extents,
    };
    use crate::version::Generation;

    #[test]
    fn overview_extents_zero_samples() {
        assert_eq!(calculate_overview_waveform_extents(0, 44_100.0), (0, 0));
    }

    #[test]
    fn overview_extents_long_track() {
        assert_eq!(
            calculate_overview_waveform_extents(456 * 1024, 48_000.0),
            (1024, 456)
        );
    }

    #[test]
    fn overview_extents_short_track_one_sample_per_entry() {
        assert_eq!(calculate_overview_waveform_extents(500, 44_100.0), (500, 1));
    }

    #[test]
    fn high_resolution_extents_44_1k() {
        let (_, samples_per_entry) = calculate_high_resolution_waveform_extents(1, 44_100.0);
        assert_eq!(samples_per_entry, 420);
    }

    #[test]
    fn high_resolution_extents_48k() {
        assert_eq!(calculate_high_resolution_waveform_extents(1825, 48_000.0), (5, 456));
    }

    #[test]
    fn overview_blob_roundtrip() {
        let blob = OverviewWaveformBlob {
            points: vec![
                WaveformPoint { low: 1, mid: 2, high: 3 },
                WaveformPoint { low: 0, mid: 0, high: 0 },
            ],
        };
        assert_eq!(OverviewWaveformBlob::decode(&blob.encode()).unwrap(), blob);
    }

    #[test]
    fn high_resolution_blob_roundtrip_v1_carries_opacity() {
        let blob = HighResolutionWaveformBlob {
            generation: Generation::V1,
            entries: vec![HighResolutionWaveformEntry {
                low: WaveformBand { value: 10, opacity: Some(128) },
                mid: WaveformBand { value: 20, opacity: Some(200) },
                high: WaveformBand { value: 30, opacity: Some(255) },
            }],
        };
        assert_eq!(HighResolutionWaveformBlob::decode(&blob.encode()).unwrap(), blob);
    }

    #[test]
    fn high_resolution_blob_roundtrip_v2v3_drops_opacity() {
        let blob = HighResolutionWaveformBlob {
            generation: Generation::V2V3,
            entries: vec![HighResolutionWaveformEntry {
                low: WaveformBand { value: 10, opacity: None },
                mid: WaveformBand { value: 20, opacity: None },
                high: WaveformBand { value: 30, opacity: None },
            }],
        };
        let decoded = HighResolutionWaveformBlob::decode(&blob.encode()).unwrap();
        assert_eq!(decoded, blob);
        assert!(decoded.entries.iter().all(|e| e.low.opacity.is_none()));
    }
}
