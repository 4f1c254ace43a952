/*!
 * Core Types
 * Integer aliases shared by the layout, registries and codecs
 */

/// A packed group/access value
pub type Bitmask = u32;

/// Numeric group identifier (the high-order field of a bitmask)
pub type GroupId = u32;

/// Access field value (the low-order field of a bitmask)
pub type AccessValue = u32;

/// Number of low-order bits reserved for the access field
pub type AccessBits = u32;
