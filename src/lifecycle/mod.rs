/*!
 * Lifecycle Module
 * Group deprecation metadata and migration rules
 *
 * Deprecating or migrating an unregistered group is an error, unlike plain
 * lookups which quietly resolve unknown names to zero.
 */

mod manager;
mod types;

pub use manager::GroupLifecycle;
pub use types::{DeprecationInfo, DeprecationOptions, GroupMigration, MigrationResult};
