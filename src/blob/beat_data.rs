// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use super::{Cursor, DecodeError, write_bool, write_f64, write_i32, write_u32, write_u64};

/// One marker in a beat grid: a sample offset tagged with its beat number
/// and the beat count until the next marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatGridMarker {
    pub sample_offset: f64,
    pub beat_number: i32,
    pub beats_until_next_marker: i32,
    pub unused: i32,
}

impl BeatGridMarker {
    fn encode(self, buf: &mut Vec<u8>) {
        write_f64(buf, self.sample_offset);
        write_i32(buf, self.beat_number);
        write_i32(buf, self.beats_until_next_marker);
        write_i32(buf, self.unused);
    }

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            sample_offset: cursor.read_f64()?,
            beat_number: cursor.read_i32()?,
            beats_until_next_marker: cursor.read_i32()?,
            unused: cursor.read_i32()?,
        })
    }
}

fn encode_markers(buf: &mut Vec<u8>, markers: &[BeatGridMarker]) {
    write_u32(buf, markers.len() as u32);
    for marker in markers {
        marker.encode(buf);
    }
}

fn decode_markers(cursor: &mut Cursor<'_>) -> Result<Vec<BeatGridMarker>, DecodeError> {
    let count = cursor.read_u32()? as usize;
    (0..count).map(|_| BeatGridMarker::decode(cursor)).collect()
}

/// Decoded `PerformanceData.beatData`.
///
/// Always carries both the default grid (as analysed) and the adjusted
/// grid (as the user may have edited it); `is_default_adjusted` records
/// whether the adjusted grid differs from the default one.
#[derive(Debug, Clone, PartialEq)]
pub struct BeatDataBlob {
    pub sample_rate: f64,
    pub sample_count: u64,
    pub is_default_adjusted: bool,
    pub default_markers: Vec<BeatGridMarker>,
    pub adjusted_markers: Vec<BeatGridMarker>,
}

impl BeatDataBlob {
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_f64(&mut buf, self.sample_rate);
        write_u64(&mut buf, self.sample_count);
        write_bool(&mut buf, self.is_default_adjusted);
        encode_markers(&mut buf, &self.default_markers);
        encode_markers(&mut buf, &self.adjusted_markers);
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = Cursor::new(bytes);
        let sample_rate = cursor.read_f64()?;
        let sample_count = cursor.read_u64()?;
        let is_default_adjusted = cursor.read_bool()?;
        let default_markers = decode_markers(&mut cursor)?;
        let adjusted_markers = decode_markers(&mut cursor)?;
        cursor.finish()?;
        Ok(Self {
            sample_rate,
            sample_count,
            is_default_adjusted,
            default_markers,
            adjusted_markers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{BeatDataBlob, BeatGridMarker};

    fn marker(sample_offset: f64, beat_number: i32) -> BeatGridMarker {
        BeatGridMarker {
            sample_offset,
            beat_number,
            beats_until_next_marker: 4,
            unused: 0,
        }
    }

    #[test]
    fn roundtrip_with_both_grids_present() {
        let blob = BeatDataBlob {
            sample_rate: 44100.0,
            sample_count: 10_000_000,
            is_default_adjusted: true,
            default_markers: vec![marker(0.0, 1), marker(44100.0, 2)],
            adjusted_markers: vec![marker(0.0, 1)],
        };
        assert_eq!(BeatDataBlob::decode(&blob.encode()).unwrap(), blob);
    }

    #[test]
    fn roundtrip_with_empty_grids() {
        let blob = BeatDataBlob {
            sample_rate: 48000.0,
            sample_count: 0,
            is_default_adjusted: false,
            default_markers: Vec::new(),
            adjusted_markers: Vec::new(),
        };
        assert_eq!(BeatDataBlob::decode(&blob.encode()).unwrap(), blob);
    }
}
