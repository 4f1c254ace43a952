/*!
 * Layout Module
 * Bit-field algebra for packing a group id and an access field into one integer
 *
 * A bitmask is `(group << access_bits) | access`. The layout is a small
 * immutable value; every other component receives it by reference.
 */

mod bit_layout;

pub use bit_layout::{build_mask, derive_required_bits, BitLayout};
