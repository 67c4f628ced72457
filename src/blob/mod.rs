// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

//! Codecs for the `BLOB`-valued performance-data columns.
//!
//! Every codec here is a pure `encode`/`decode` pair over a fixed binary
//! layout; none of them touch the database. `PerformanceData` (see
//! [`crate::performance`]) stores the encoded bytes directly and leaves
//! interpretation to these types.

mod beat_data;
mod loops;
mod quick_cues;
mod track_data;
mod waveform;

pub use self::beat_data::{BeatDataBlob, BeatGridMarker};
pub use self::loops::{Loop, LoopsBlob, LOOP_COUNT};
pub use self::quick_cues::{QuickCue, QuickCuesBlob, QUICK_CUE_COUNT};
pub use self::track_data::TrackDataBlob;
pub use self::waveform::{
    HighResolutionWaveformBlob, HighResolutionWaveformEntry, OverviewWaveformBlob, WaveformBand,
    WaveformPoint, calculate_high_resolution_waveform_extents, calculate_overview_waveform_extents,
};

/// Shared RGBA colour tag used by quick cues and loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Colour {
    fn write(self, buf: &mut Vec<u8>) {
        buf.push(self.red);
        buf.push(self.green);
        buf.push(self.blue);
        buf.push(self.alpha);
    }

    fn read(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            red: cursor.read_u8()?,
            green: cursor.read_u8()?,
            blue: cursor.read_u8()?,
            alpha: cursor.read_u8()?,
        })
    }
}

/// A blob was truncated or otherwise malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed blob: {message}")]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    fn eof(what: &str) -> Self {
        Self {
            message: format!("unexpected end of blob while reading {what}"),
        }
    }

    fn invalid(what: &str) -> Self {
        Self {
            message: format!("invalid {what}"),
        }
    }
}

/// Minimal little-endian cursor shared by all blob codecs.
///
/// Not `std::io::Cursor`: these blobs are small, fixed-shape, and every
/// field read can fail with a codec-specific message, which plain
/// `std::io::Read` doesn't carry.
struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], DecodeError> {
        let end = self.position.checked_add(len).ok_or_else(|| DecodeError::eof(what))?;
        let slice = self.bytes.get(self.position..end).ok_or_else(|| DecodeError::eof(what))?;
        self.position = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1, "u8")?[0])
    }

    fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? != 0)
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes: [u8; 4] = self.take(4, "u32")?.try_into().expect("exactly 4 bytes");
        Ok(u32::from_le_bytes(bytes))
    }

    fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let bytes: [u8; 8] = self.take(8, "u64")?.try_into().expect("exactly 8 bytes");
        Ok(u64::from_le_bytes(bytes))
    }

    fn read_i32(&mut self) -> Result<i32, DecodeError> {
        let bytes: [u8; 4] = self.take(4, "i32")?.try_into().expect("exactly 4 bytes");
        Ok(i32::from_le_bytes(bytes))
    }

    fn read_f64(&mut self) -> Result<f64, DecodeError> {
        let bytes: [u8; 8] = self.take(8, "f64")?.try_into().expect("exactly 8 bytes");
        Ok(f64::from_le_bytes(bytes))
    }

    fn read_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len, "string")?;
        String::from_utf8(bytes.to_vec()).map_err(|_err| DecodeError::invalid("string (not utf-8)"))
    }

    fn finish(self) -> Result<(), DecodeError> {
        if self.position == self.bytes.len() {
            Ok(())
        } else {
            Err(DecodeError::invalid("trailing bytes"))
        }
    }
}

fn write_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn write_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn write_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn write_f64(buf: &mut Vec<u8>, value: f64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn write_bool(buf: &mut Vec<u8>, value: bool) {
    buf.push(u8::from(value));
}

fn write_string(buf: &mut Vec<u8>, value: &str) {
    write_u32(buf, value.len() as u32);
    buf.extend_from_slice(value.as_bytes());
}
