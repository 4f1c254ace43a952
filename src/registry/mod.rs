/*!
 * Registry Module
 * Permission, group and permission-set tables
 *
 * Registries are plain owned values built once through
 * [`PermissionRegistry::builder`] and mutated only through explicit
 * `register*` calls. Lookups of unknown names never fail: they resolve to
 * zero access bits or group `0`.
 */

mod groups;
mod permissions;
mod sets;

pub use groups::{GroupDefinition, GroupTable};
pub use permissions::{PermissionRegistry, PermissionRegistryBuilder};
pub use sets::PermissionSetRegistry;
