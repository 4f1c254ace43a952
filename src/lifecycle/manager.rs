/*!
 * Group Lifecycle
 * Deprecate groups and migrate bitmasks onto their replacements
 */

use super::types::{DeprecationInfo, DeprecationOptions, GroupMigration, MigrationResult};
use crate::core::types::{AccessValue, Bitmask};
use crate::core::{LifecycleError, LifecycleResult};
use crate::registry::{GroupDefinition, PermissionRegistry};
use log::{debug, info};

/// Migration rules for deprecated groups
///
/// Deprecation flags live on the group definitions inside the
/// [`PermissionRegistry`]; this type owns the migration rules and applies
/// them. Deprecation is monotonic: groups are flagged, never removed.
#[derive(Debug, Clone, Default)]
pub struct GroupLifecycle {
    migrations: Vec<GroupMigration>,
}

impl GroupLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag a registered group as deprecated
    pub fn deprecate(
        &self,
        registry: &mut PermissionRegistry,
        group: &str,
        options: DeprecationOptions,
    ) -> LifecycleResult<()> {
        let definition = registry
            .groups_mut()
            .definition_mut(group)
            .ok_or_else(|| LifecycleError::GroupNotFound(group.to_string()))?;

        let message = options
            .message
            .unwrap_or_else(|| default_message(group, options.replaced_by.as_deref()));

        definition.deprecated = true;
        definition.deprecated_since = options.since;
        definition.replaced_by = options.replaced_by;
        definition.message = Some(message);

        info!(
            "Group {} deprecated{}",
            group,
            definition
                .replaced_by
                .as_deref()
                .map(|target| format!(" in favor of {}", target))
                .unwrap_or_default()
        );
        Ok(())
    }

    /// Store a migration rule; both groups must be registered
    ///
    /// Several rules may share a source group. At migrate time the last rule
    /// whose target is the group's `replaced_by` applies.
    pub fn define_migration(
        &mut self,
        registry: &PermissionRegistry,
        migration: GroupMigration,
    ) -> LifecycleResult<()> {
        for group in [&migration.source_group, &migration.target_group] {
            if !registry.groups().contains(group) {
                return Err(LifecycleError::GroupNotFound(group.clone()));
            }
        }
        debug!(
            "Defined migration {} -> {}",
            migration.source_group, migration.target_group
        );
        self.migrations.push(migration);
        Ok(())
    }

    pub fn migrations(&self) -> &[GroupMigration] {
        &self.migrations
    }

    /// Move a bitmask of a deprecated group onto its replacement
    ///
    /// Bitmasks whose group is unknown, not deprecated or has no replacement
    /// come back unchanged with `was_migrated == false`.
    pub fn migrate(&self, registry: &PermissionRegistry, bitmask: Bitmask) -> MigrationResult {
        let layout = registry.layout();
        let group_id = layout.split_group(bitmask);

        let Some(group) = registry.group_name(group_id) else {
            return MigrationResult::unchanged(bitmask);
        };
        let replacement = match registry.groups().definition(group) {
            Some(GroupDefinition {
                deprecated: true,
                replaced_by: Some(replacement),
                ..
            }) => replacement,
            _ => return MigrationResult::unchanged(bitmask),
        };

        let access = layout.split_access(bitmask);
        let migrated_access = match self
            .migrations
            .iter()
            .rev()
            .find(|migration| migration.matches(group, replacement))
            .and_then(|migration| migration.permission_mapping.as_ref())
        {
            Some(mapping) => remap_access(registry, access, mapping),
            None => access,
        };

        let target_id = registry.group_id(replacement).unwrap_or(0);
        let migrated_value = layout.combine(target_id, migrated_access);
        debug!(
            "Migrated {:#x} ({}) to {:#x} ({})",
            bitmask, group, migrated_value, replacement
        );

        MigrationResult {
            original_value: bitmask,
            migrated_value,
            was_migrated: true,
        }
    }

    /// Migrate every bitmask, preserving order
    pub fn migrate_all(&self, registry: &PermissionRegistry, bitmasks: &[Bitmask]) -> Vec<MigrationResult> {
        bitmasks
            .iter()
            .map(|bitmask| self.migrate(registry, *bitmask))
            .collect()
    }

    pub fn is_deprecated(&self, registry: &PermissionRegistry, group: &str) -> bool {
        registry
            .groups()
            .definition(group)
            .map(|definition| definition.deprecated)
            .unwrap_or(false)
    }

    pub fn deprecation_info(&self, registry: &PermissionRegistry, group: &str) -> Option<DeprecationInfo> {
        registry
            .groups()
            .definition(group)
            .and_then(|definition| deprecation_info(group, definition))
    }

    /// Every deprecated group, in registration order
    pub fn deprecated_groups(&self, registry: &PermissionRegistry) -> Vec<DeprecationInfo> {
        registry
            .groups()
            .iter()
            .filter_map(|(name, definition)| deprecation_info(name, definition))
            .collect()
    }
}

fn default_message(group: &str, replaced_by: Option<&str>) -> String {
    match replaced_by {
        Some(target) => format!("Group '{}' is deprecated, use '{}' instead", group, target),
        None => format!("Group '{}' is deprecated", group),
    }
}

fn deprecation_info(group: &str, definition: &GroupDefinition) -> Option<DeprecationInfo> {
    if !definition.deprecated {
        return None;
    }
    Some(DeprecationInfo {
        group: group.to_string(),
        since: definition.deprecated_since.clone(),
        replaced_by: definition.replaced_by.clone(),
        message: definition
            .message
            .clone()
            .unwrap_or_else(|| default_message(group, definition.replaced_by.as_deref())),
    })
}

/// Allow-list remap: only mapped source permissions carry over
fn remap_access(registry: &PermissionRegistry, access: AccessValue, mapping: &[(String, String)]) -> AccessValue {
    mapping
        .iter()
        .filter(|(source, _)| access & registry.value_of(source) != 0)
        .fold(0, |acc, (_, target)| acc | registry.value_of(target))
}
