// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use super::{Colour, Cursor, DecodeError, write_bool, write_f64, write_string};

/// Number of loop slots carried by the blob, matching the 8 loop pads
/// exposed by the hardware.
pub const LOOP_COUNT: usize = 8;

/// One populated loop slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub label: String,
    pub start_sample_offset: f64,
    pub end_sample_offset: f64,
    pub colour: Colour,
}

/// Decoded `PerformanceData.loops`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopsBlob {
    pub loops: [Option<Loop>; LOOP_COUNT],
}

impl LoopsBlob {
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for entry in &self.loops {
            match entry {
                None => write_bool(&mut buf, false),
                Some(entry) => {
                    write_bool(&mut buf, true);
                    write_string(&mut buf, &entry.label);
                    write_f64(&mut buf, entry.start_sample_offset);
                    write_f64(&mut buf, entry.end_sample_offset);
                    entry.colour.write(&mut buf);
                }
            }
        }
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = Cursor::new(bytes);
        let mut loop_slots = Vec::with_capacity(LOOP_COUNT);
        for _ in 0..LOOP_COUNT {
            let entry = if cursor.read_bool()? {
                Some(Loop {
                    label: cursor.read_string()?,
                    start_sample_offset: cursor.read_f64()?,
                    end_sample_offset: cursor.read_f64()?,
                    colour: Colour::read(&mut cursor)?,
                })
            } else {
                None
            };
            loop_slots.push(entry);
        }
        let loops: [Option<Loop>; LOOP_COUNT] = loop_slots
            .try_into()
            .unwrap_or_else(|_| unreachable!("exactly LOOP_COUNT slots were pushed"));
        cursor.finish()?;
        Ok(Self { loops })
    }
}

#[cfg(test)]
mod tests {
    use super::{Loop, LoopsBlob, LOOP_COUNT};
    use crate::blob::Colour;

    #[test]
    fn roundtrip_mixed_slots() {
        let mut loops: [Option<Loop>; LOOP_COUNT] = Default::default();
        loops[1] = Some(Loop {
            label: "Build".to_owned(),
            start_sample_offset: 1000.0,
            end_sample_offset: 5000.0,
            colour: Colour { red: 0, green: 255, blue: 0, alpha: 255 },
        });
        let blob = LoopsBlob { loops };
        assert_eq!(LoopsBlob::decode(&blob.encode()).unwrap(), blob);
    }

    #[test]
    fn roundtrip_all_empty() {
        let blob = LoopsBlob { loops: Default::default() };
        assert_eq!(LoopsBlob::decode(&blob.encode()).unwrap(), blob);
    }
}
