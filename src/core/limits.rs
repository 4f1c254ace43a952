/*!
 * Limits and Constants
 *
 * Centralized location for widths, tags and reserved names used by the
 * bitmask layout, the registries and the packed array codec.
 */

// =============================================================================
// LAYOUT LIMITS
// =============================================================================

/// Access width used when no explicit permission values exist
pub const DEFAULT_ACCESS_BITS: u32 = 5;

/// Widest access field a 32-bit bitmask can carry while keeping one group bit
pub const MAX_ACCESS_BITS: u32 = 31;

// =============================================================================
// RESERVED NAMES AND TOKENS
// =============================================================================

/// Permission name that always resolves to the full access mask
pub const ALL_PERMISSION: &str = "ALL";

/// Decode-only synonym for [`ALL_PERMISSION`] in the string format
pub const ALL_WILDCARD: &str = "*";

/// Token rendered when no individual permission is set
pub const NONE_TOKEN: &str = "NONE";

/// Separator between group label and permission list
pub const GROUP_SEPARATOR: &str = ":";

/// Separator between permission names
pub const PERMISSION_SEPARATOR: &str = ",";

// =============================================================================
// PACKED ARRAY TAGS
// =============================================================================

/// Width tag for 8-bit elements
pub const TAG_WIDTH_8: char = 'A';

/// Width tag for 16-bit elements
pub const TAG_WIDTH_16: char = 'B';

/// Width tag for 32-bit elements
pub const TAG_WIDTH_32: char = 'C';
