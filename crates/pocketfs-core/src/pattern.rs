//! Byte patterns for fixed-content file generation.

use serde::{Deserialize, Serialize};

/// Content written by fixed-content file generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillPattern {
    /// Every byte is the same value.
    Constant(u8),
    /// Byte `i` is `start + i * step`, wrapping at 256.
    Progression { start: u8, step: u8 },
}

impl FillPattern {
    /// Decode the packed form: a non-zero high byte is the step of a
    /// progression starting at the low byte, otherwise the low byte is a
    /// constant.
    pub fn from_packed(packed: u16) -> Self {
        let [start, step] = packed.to_le_bytes();
        if step != 0 {
            Self::Progression { start, step }
        } else {
            Self::Constant(start)
        }
    }

    /// Encode into the packed form. A zero-step progression packs as a constant.
    pub fn to_packed(self) -> u16 {
        match self {
            Self::Constant(byte) => u16::from(byte),
            Self::Progression { start, step } => u16::from_le_bytes([start, step]),
        }
    }

    /// Fill `buf` from its first byte with this pattern.
    pub fn fill(self, buf: &mut [u8]) {
        match self {
            Self::Constant(byte) => buf.fill(byte),
            Self::Progression { start, step } => {
                let mut byte = start;
                for slot in buf.iter_mut() {
                    *slot = byte;
                    byte = byte.wrapping_add(step);
                }
            }
        }
    }
}

impl Default for FillPattern {
    fn default() -> Self {
        Self::Constant(0)
    }
}
