/*!
 * Packing Module
 * Compact transport encoding for sequences of bitmasks
 *
 * Works on raw integers only; it knows nothing about groups or permissions.
 */

mod packer;
mod width;

pub use packer::{pack, unpack};
pub use width::WidthClass;
