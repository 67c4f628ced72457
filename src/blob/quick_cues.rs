// SPDX-FileCopyrightText: The endjine authors
// SPDX-License-Identifier: MPL-2.0

use super::{Colour, Cursor, DecodeError, write_bool, write_f64, write_string};

/// Number of quick-cue slots carried by the blob, matching the 8 hot-cue
/// pads exposed by the hardware.
pub const QUICK_CUE_COUNT: usize = 8;

/// One populated quick-cue slot.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickCue {
    pub label: String,
    pub sample_offset: f64,
    pub colour: Colour,
}

/// Decoded `PerformanceData.quickCues`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickCuesBlob {
    pub cues: [Option<QuickCue>; QUICK_CUE_COUNT],
    pub main_cue_sample_offset: f64,
    pub main_cue_flag: bool,
    pub adjusted_main_cue_sample_offset: f64,
}

impl QuickCuesBlob {
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for cue in &self.cues {
            match cue {
                None => write_bool(&mut buf, false),
                Some(cue) => {
                    write_bool(&mut buf, true);
                    write_string(&mut buf, &cue.label);
                    write_f64(&mut buf, cue.sample_offset);
                    cue.colour.write(&mut buf);
                }
            }
        }
        write_f64(&mut buf, self.main_cue_sample_offset);
        write_bool(&mut buf, self.main_cue_flag);
        write_f64(&mut buf, self.adjusted_main_cue_sample_offset);
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = Cursor::new(bytes);
        let mut cue_slots = Vec::with_capacity(QUICK_CUE_COUNT);
        for _ in 0..QUICK_CUE_COUNT {
            let cue = if cursor.read_bool()? {
                Some(QuickCue {
                    label: cursor.read_string()?,
                    sample_offset: cursor.read_f64()?,
                    colour: Colour::read(&mut cursor)?,
                })
            } else {
                None
            };
            cue_slots.push(cue);
        }
        let cues: [Option<QuickCue>; QUICK_CUE_COUNT] = cue_slots
            .try_into()
            .unwrap_or_else(|_| unreachable!("exactly QUICK_CUE_COUNT slots were pushed"));
        let main_cue_sample_offset = cursor.read_f64()?;
        let main_cue_flag = cursor.read_bool()?;
        let adjusted_main_cue_sample_offset = cursor.read_f64()?;
        cursor.finish()?;
        Ok(Self {
            cues,
            main_cue_sample_offset,
            main_cue_flag,
            adjusted_main_cue_sample_offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Colour, QuickCue, QuickCuesBlob, QUICK_CUE_COUNT};

    #[test]
    fn roundtrip_mixed_slots() {
        let mut cues: [Option<QuickCue>; QUICK_CUE_COUNT] = Default::default();
        cues[0] = Some(QuickCue {
            label: "Drop".to_owned(),
            sample_offset: 12345.0,
            colour: Colour { red: 255, green: 0, blue: 0, alpha: 255 },
        });
        cues[3] = Some(QuickCue {
            label: String::new(),
            sample_offset: 0.0,
            colour: Colour::default(),
        });
        let blob = QuickCuesBlob {
            cues,
            main_cue_sample_offset: 100.0,
            main_cue_flag: true,
            adjusted_main_cue_sample_offset: 105.0,
        };
        assert_eq!(QuickCuesBlob::decode(&blob.encode()).unwrap(), blob);
    }

    #[test]
    fn roundtrip_all_empty() {
        let blob = QuickCuesBlob {
            cues: Default::default(),
            main_cue_sample_offset: 0.0,
            main_cue_flag: false,
            adjusted_main_cue_sample_offset: 0.0,
        };
        assert_eq!(QuickCuesBlob::decode(&blob.encode()).unwrap(), blob);
    }
}
