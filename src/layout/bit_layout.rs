/*!
 * Bit Layout
 * Split and combine group/access fields for a configurable access width
 */

use crate::core::limits::{DEFAULT_ACCESS_BITS, MAX_ACCESS_BITS};
use crate::core::types::{AccessBits, AccessValue, Bitmask, GroupId};
use crate::core::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};

/// Number of bits needed to represent the largest value
///
/// Returns `ceil(log2(max + 1))` when any value is non-zero, otherwise `default`.
pub fn derive_required_bits<I>(values: I, default: AccessBits) -> AccessBits
where
    I: IntoIterator<Item = u32>,
{
    match values.into_iter().max() {
        Some(max) if max > 0 => u32::BITS - max.leading_zeros(),
        _ => default,
    }
}

/// `(1 << bits) - 1`, saturating at the full 32-bit word
#[inline]
pub fn build_mask(bits: AccessBits) -> AccessValue {
    if bits >= u32::BITS {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

/// Group/access field layout
///
/// `access_mask` is normally `build_mask(access_bits)`; a registry built with
/// an explicit mask override keeps that override here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BitLayout {
    access_bits: AccessBits,
    access_mask: AccessValue,
}

impl BitLayout {
    /// Layout with `access_bits` low-order access bits
    pub fn new(access_bits: AccessBits) -> RegistryResult<Self> {
        if access_bits == 0 || access_bits > MAX_ACCESS_BITS {
            return Err(RegistryError::InvalidAccessBits(access_bits));
        }
        Ok(Self {
            access_bits,
            access_mask: build_mask(access_bits),
        })
    }

    /// Layout whose mask is supplied by the caller instead of derived
    pub fn with_mask(access_bits: AccessBits, access_mask: AccessValue) -> RegistryResult<Self> {
        let mut layout = Self::new(access_bits)?;
        layout.access_mask = access_mask;
        Ok(layout)
    }

    #[inline]
    pub fn access_bits(&self) -> AccessBits {
        self.access_bits
    }

    #[inline]
    pub fn access_mask(&self) -> AccessValue {
        self.access_mask
    }

    /// Pack a group and an access value; access bits outside the mask are dropped
    #[inline]
    pub fn combine(&self, group: GroupId, access: AccessValue) -> Bitmask {
        (group << self.access_bits) | (access & self.access_mask)
    }

    #[inline]
    pub fn split_group(&self, bitmask: Bitmask) -> GroupId {
        bitmask >> self.access_bits
    }

    #[inline]
    pub fn split_access(&self, bitmask: Bitmask) -> AccessValue {
        bitmask & self.access_mask
    }

    /// Whether `access` sets every bit of the mask
    #[inline]
    pub fn is_full(&self, access: AccessValue) -> bool {
        access == self.access_mask
    }
}

impl Default for BitLayout {
    fn default() -> Self {
        Self {
            access_bits: DEFAULT_ACCESS_BITS,
            access_mask: build_mask(DEFAULT_ACCESS_BITS),
        }
    }
}
