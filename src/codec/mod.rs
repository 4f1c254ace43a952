/*!
 * Codec Module
 * Bitmask construction, decoding, checks and the human-readable string form
 *
 * ## Usage
 * ```
 * use permbits::codec::BitmaskCodec;
 *
 * let codec = BitmaskCodec::builder()
 *     .permissions([("VIEW", 1), ("EDIT", 2), ("DELETE", 4)])
 *     .access_bits(6)
 *     .group("DOCUMENTS", 1)
 *     .build()?;
 *
 * let bitmask = codec.create("DOCUMENTS", ["VIEW", "EDIT"]);
 * assert_eq!(bitmask, 67);
 * assert_eq!(codec.to_string(bitmask), "DOCUMENTS:VIEW,EDIT");
 * assert!(!codec.can(codec.from_string("DOCUMENTS:VIEW"), "DELETE"));
 * # Ok::<(), permbits::core::RegistryError>(())
 * ```
 */

mod access;
mod bitmask;
mod text;
mod types;

pub use access::has_required_permission;
pub use bitmask::{BitmaskCodec, BitmaskCodecBuilder};
pub use types::{GroupRef, ParsedBitmask, Permission, StandardAccess};
