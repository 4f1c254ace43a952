/*!
 * Permbits Library
 * Role/permission bitmasks: a low-order access field packed with a
 * high-order group field
 *
 * ## Components
 * - [`layout`]: split/combine arithmetic for a configurable access width
 * - [`registry`]: permission, group and permission-set tables
 * - [`lifecycle`]: group deprecation and migration onto replacements
 * - [`codec`]: build, parse, check and stringify bitmasks
 * - [`packing`]: width-tagged base64 transport encoding for bitmask arrays
 * - [`sync`]: lock-free snapshots of a codec shared between threads
 * - [`config`]: JSON configuration
 */

pub mod codec;
pub mod config;
pub mod core;
pub mod layout;
pub mod lifecycle;
pub mod packing;
pub mod registry;
pub mod sync;

// Re-exports
pub use codec::{has_required_permission, BitmaskCodec, GroupRef, ParsedBitmask, Permission};
pub use config::CodecConfig;
pub use crate::core::errors::*;
pub use crate::core::types::{AccessValue, Bitmask, GroupId};
pub use layout::BitLayout;
pub use lifecycle::{DeprecationOptions, GroupMigration, MigrationResult};
pub use packing::{pack, unpack};
pub use registry::{PermissionRegistry, PermissionSetRegistry};
pub use sync::SharedCodec;
