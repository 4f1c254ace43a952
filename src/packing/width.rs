/*!
 * Width Classes
 * Element widths of a packed array and their prefix tags
 */

use crate::core::limits::{TAG_WIDTH_16, TAG_WIDTH_32, TAG_WIDTH_8};
use serde::{Deserialize, Serialize};

/// Shared element width of one packed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthClass {
    Bits8,
    Bits16,
    Bits32,
}

impl WidthClass {
    /// Narrowest class that holds `max`
    pub fn for_max(max: u32) -> Self {
        if max < 1 << 8 {
            WidthClass::Bits8
        } else if max < 1 << 16 {
            WidthClass::Bits16
        } else {
            WidthClass::Bits32
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            TAG_WIDTH_8 => Some(WidthClass::Bits8),
            TAG_WIDTH_16 => Some(WidthClass::Bits16),
            TAG_WIDTH_32 => Some(WidthClass::Bits32),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            WidthClass::Bits8 => TAG_WIDTH_8,
            WidthClass::Bits16 => TAG_WIDTH_16,
            WidthClass::Bits32 => TAG_WIDTH_32,
        }
    }

    /// Bytes per element
    pub fn byte_len(self) -> usize {
        match self {
            WidthClass::Bits8 => 1,
            WidthClass::Bits16 => 2,
            WidthClass::Bits32 => 4,
        }
    }

    /// Append `value` little-endian, truncated to this width
    #[inline]
    pub(crate) fn write(self, value: u32, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&value.to_le_bytes()[..self.byte_len()]);
    }

    /// Reassemble one little-endian element of exactly `byte_len` bytes
    #[inline]
    pub(crate) fn read(self, chunk: &[u8]) -> u32 {
        let mut bytes = [0u8; 4];
        bytes[..chunk.len()].copy_from_slice(chunk);
        u32::from_le_bytes(bytes)
    }
}
