// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use super::{Cursor, DecodeError, write_bool, write_f64, write_u64};

/// Decoded `PerformanceData.trackData`.
///
/// Sample rate/count of the analysed audio, whether analysis has completed,
/// and three average-loudness-like scalars (peak, average, and a
/// perceived/normalised figure) computed during analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackDataBlob {
    pub sample_rate: f64,
    pub sample_count: u64,
    pub is_analyzed: bool,
    pub average_loudness: [f64; 3],
}

impl TrackDataBlob {
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8 + 8 + 1 + 3 * 8);
        write_f64(&mut buf, self.sample_rate);
        write_u64(&mut buf, self.sample_count);
        write_bool(&mut buf, self.is_analyzed);
        for loudness in self.average_loudness {
            write_f64(&mut buf, loudness);
        }
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = Cursor::new(bytes);
        let sample_rate = cursor.read_f64()?;
        let sample_count = cursor.read_u64()?;
        let is_analyzed = cursor.read_bool()?;
        let average_loudness = [
            cursor.read_f64()?,
            cursor.read_f64()?,
            cursor.read_f64()?,
        ];
        cursor.finish()?;
        Ok(Self {
            sample_rate,
            sample_count,
            is_analyzed,
            average_loudness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TrackDataBlob;

    #[test]
    fn roundtrip() {
        let blob = TrackDataBlob {
            sample_rate: 44100.0,
            sample_count: 123_456_789,
            is_analyzed: true,
            average_loudness: [0.1, -0.2, 0.3],
        };
        assert_eq!(TrackDataBlob::decode(&blob.encode()).unwrap(), blob);
    }

    #[test]
    fn truncated_is_an_error() {
        assert!(TrackDataBlob::decode(&[0, 1, 2]).is_err());
    }
}
