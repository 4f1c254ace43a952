/*!
 * Bitmask Codec
 * Build, inspect and check bitmasks against a permission schema
 */

use super::access::has_required_permission;
use super::types::{GroupRef, ParsedBitmask, Permission, StandardAccess};
use crate::core::limits::ALL_PERMISSION;
use crate::core::types::{AccessBits, AccessValue, Bitmask, GroupId};
use crate::core::{LifecycleResult, RegistryResult};
use crate::layout::BitLayout;
use crate::lifecycle::{DeprecationInfo, DeprecationOptions, GroupLifecycle, GroupMigration, MigrationResult};
use crate::registry::{GroupDefinition, PermissionRegistry, PermissionRegistryBuilder, PermissionSetRegistry};
use log::debug;
use std::collections::BTreeMap;

/// Runtime-facing facade over the registries, sets and lifecycle rules
///
/// Every read operation is a pure function of its arguments and the current
/// schema. Mutation goes through `&mut self`; share a codec across threads
/// with [`crate::sync::SharedCodec`].
#[derive(Debug, Clone)]
pub struct BitmaskCodec {
    registry: PermissionRegistry,
    sets: PermissionSetRegistry,
    lifecycle: GroupLifecycle,
    standard: StandardAccess,
}

impl BitmaskCodec {
    /// Start a builder with an empty schema
    pub fn builder() -> BitmaskCodecBuilder {
        BitmaskCodecBuilder::new()
    }

    /// Codec over a built registry with no permission sets
    pub fn new(registry: PermissionRegistry) -> Self {
        Self::from_parts(registry, PermissionSetRegistry::new())
    }

    /// Codec over a registry and a set table
    pub fn from_parts(registry: PermissionRegistry, sets: PermissionSetRegistry) -> Self {
        Self {
            registry,
            sets,
            lifecycle: GroupLifecycle::new(),
            standard: StandardAccess::default(),
        }
    }

    /// Replace the bit values behind `can_read`, `can_write`, ...
    pub fn with_standard_access(mut self, standard: StandardAccess) -> Self {
        self.standard = standard;
        self
    }

    /// Permission and group registry
    pub fn registry(&self) -> &PermissionRegistry {
        &self.registry
    }

    /// Permission-set table
    pub fn sets(&self) -> &PermissionSetRegistry {
        &self.sets
    }

    /// Migration rules
    pub fn lifecycle(&self) -> &GroupLifecycle {
        &self.lifecycle
    }

    /// Access width and mask in use
    pub fn layout(&self) -> &BitLayout {
        self.registry.layout()
    }

    /// Bit values used by the standard access checks
    pub fn standard_access(&self) -> &StandardAccess {
        &self.standard
    }

    // ------------------------------------------------------------------
    // Schema mutation
    // ------------------------------------------------------------------

    /// Register or overwrite a permission at runtime
    pub fn register_permission(&mut self, name: impl Into<String>, value: AccessValue) -> RegistryResult<()> {
        self.registry.register(name, value)
    }

    /// Register or re-point a group name
    pub fn register_group(&mut self, name: impl Into<String>, id: GroupId) {
        self.registry.register_group(name, id);
    }

    /// Define or replace a named permission set
    pub fn define_permission_set<I, S>(&mut self, name: impl Into<String>, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets.define(name, members);
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Group id for a reference; unregistered names resolve to `0`
    pub fn resolve_group(&self, group: &GroupRef) -> GroupId {
        match group {
            GroupRef::Id(id) => *id,
            GroupRef::Name(name) => self.registry.group_id(name).unwrap_or_else(|| {
                debug!("Unknown group '{}' resolves to 0", name);
                0
            }),
        }
    }

    /// Access bits for one permission; sets take precedence over plain names
    pub fn resolve_permission(&self, permission: &Permission) -> AccessValue {
        match permission {
            Permission::All => self.layout().access_mask(),
            Permission::Named(name) => self.resolve_name(name),
        }
    }

    /// Access bits for a set or plain permission name, `ALL` included
    pub(crate) fn resolve_name(&self, name: &str) -> AccessValue {
        if self.sets.contains(name) {
            self.sets.resolve(name, &self.registry)
        } else {
            self.registry.value_of(name)
        }
    }

    fn resolve_all<I, P>(&self, permissions: I) -> AccessValue
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        permissions
            .into_iter()
            .fold(0, |acc, permission| acc | self.resolve_permission(&permission.into()))
    }

    // ------------------------------------------------------------------
    // Encoding
    // ------------------------------------------------------------------

    /// Bitmask granting `permissions` within `group`
    pub fn create<G, I, P>(&self, group: G, permissions: I) -> Bitmask
    where
        G: Into<GroupRef>,
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        let group_id = self.resolve_group(&group.into());
        let access = self.resolve_all(permissions);
        self.layout().combine(group_id, access)
    }

    /// Add permissions to an existing bitmask, keeping its group
    pub fn grant<I, P>(&self, bitmask: Bitmask, permissions: I) -> Bitmask
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        let layout = self.layout();
        let access = layout.split_access(bitmask) | self.resolve_all(permissions);
        layout.combine(layout.split_group(bitmask), access)
    }

    /// Remove permissions from an existing bitmask, keeping its group
    pub fn revoke<I, P>(&self, bitmask: Bitmask, permissions: I) -> Bitmask
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        let layout = self.layout();
        let access = layout.split_access(bitmask) & !self.resolve_all(permissions);
        layout.combine(layout.split_group(bitmask), access)
    }

    // ------------------------------------------------------------------
    // Decoding
    // ------------------------------------------------------------------

    /// Group field of a bitmask
    pub fn group_of(&self, bitmask: Bitmask) -> GroupId {
        self.layout().split_group(bitmask)
    }

    /// Access field of a bitmask
    pub fn access_of(&self, bitmask: Bitmask) -> AccessValue {
        self.layout().split_access(bitmask)
    }

    /// Decode group and per-permission flags
    pub fn parse(&self, bitmask: Bitmask) -> ParsedBitmask {
        let layout = self.layout();
        let group = layout.split_group(bitmask);
        let access = layout.split_access(bitmask);

        let mut permissions: BTreeMap<String, bool> = self
            .registry
            .iter()
            .map(|(name, value)| (name.to_string(), access & value != 0))
            .collect();
        permissions.insert(ALL_PERMISSION.to_string(), layout.is_full(access));

        ParsedBitmask {
            group,
            group_name: self.registry.group_name(group).map(str::to_string),
            access,
            permissions,
        }
    }

    // ------------------------------------------------------------------
    // Checks
    // ------------------------------------------------------------------

    /// Bit test against a registered permission; unknown names are false
    pub fn can(&self, bitmask: Bitmask, permission: &str) -> bool {
        self.access_of(bitmask) & self.registry.value_of(permission) != 0
    }

    /// True if any of `permissions` is granted
    pub fn can_any<I, S>(&self, bitmask: Bitmask, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions
            .into_iter()
            .any(|permission| self.can(bitmask, permission.as_ref()))
    }

    /// True if every one of `permissions` is granted
    pub fn can_all<I, S>(&self, bitmask: Bitmask, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions
            .into_iter()
            .all(|permission| self.can(bitmask, permission.as_ref()))
    }

    /// Whether every access bit is set
    pub fn can_everything(&self, bitmask: Bitmask) -> bool {
        self.layout().is_full(self.access_of(bitmask))
    }

    /// Standard read bit test
    pub fn can_read(&self, bitmask: Bitmask) -> bool {
        self.standard_bit(bitmask, self.standard.read)
    }

    /// Standard write bit test
    pub fn can_write(&self, bitmask: Bitmask) -> bool {
        self.standard_bit(bitmask, self.standard.write)
    }

    /// Standard create bit test
    pub fn can_create(&self, bitmask: Bitmask) -> bool {
        self.standard_bit(bitmask, self.standard.create)
    }

    /// Standard update bit test
    pub fn can_update(&self, bitmask: Bitmask) -> bool {
        self.standard_bit(bitmask, self.standard.update)
    }

    /// Standard delete bit test
    pub fn can_delete(&self, bitmask: Bitmask) -> bool {
        self.standard_bit(bitmask, self.standard.delete)
    }

    #[inline]
    fn standard_bit(&self, bitmask: Bitmask, flag: AccessValue) -> bool {
        self.access_of(bitmask) & flag != 0
    }

    /// See [`has_required_permission`]
    pub fn has_required_permission(&self, bitmasks: &[Bitmask], group: GroupId, access_flag: AccessValue) -> bool {
        has_required_permission(self.layout(), bitmasks, group, access_flag)
    }

    // ------------------------------------------------------------------
    // Group lifecycle
    // ------------------------------------------------------------------

    /// Flag a registered group as deprecated
    pub fn deprecate_group(&mut self, group: &str, options: DeprecationOptions) -> LifecycleResult<()> {
        self.lifecycle.deprecate(&mut self.registry, group, options)
    }

    /// Store a migration rule; both groups must be registered
    pub fn define_migration(&mut self, migration: GroupMigration) -> LifecycleResult<()> {
        self.lifecycle.define_migration(&self.registry, migration)
    }

    /// Move a bitmask of a deprecated group onto its replacement
    pub fn migrate(&self, bitmask: Bitmask) -> MigrationResult {
        self.lifecycle.migrate(&self.registry, bitmask)
    }

    /// Migrate every bitmask, preserving order
    pub fn migrate_all(&self, bitmasks: &[Bitmask]) -> Vec<MigrationResult> {
        self.lifecycle.migrate_all(&self.registry, bitmasks)
    }

    /// Whether a registered group is deprecated
    pub fn is_deprecated(&self, group: &str) -> bool {
        self.lifecycle.is_deprecated(&self.registry, group)
    }

    /// Deprecation details of a group, if deprecated
    pub fn deprecation_info(&self, group: &str) -> Option<DeprecationInfo> {
        self.lifecycle.deprecation_info(&self.registry, group)
    }

    /// Every deprecated group, in registration order
    pub fn deprecated_groups(&self) -> Vec<DeprecationInfo> {
        self.lifecycle.deprecated_groups(&self.registry)
    }
}

/// Builder for [`BitmaskCodec`]
#[derive(Debug, Clone, Default)]
pub struct BitmaskCodecBuilder {
    registry: PermissionRegistryBuilder,
    sets: PermissionSetRegistry,
    standard: StandardAccess,
}

impl BitmaskCodecBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a permission with an explicit value
    pub fn permission(mut self, name: impl Into<String>, value: AccessValue) -> Self {
        self.registry = self.registry.permission(name, value);
        self
    }

    /// Declare a permission whose bit is chosen at build time
    pub fn auto_permission(mut self, name: impl Into<String>) -> Self {
        self.registry = self.registry.auto_permission(name);
        self
    }

    /// Declare a permission, `None` meaning auto-assigned
    pub fn declare(mut self, name: impl Into<String>, value: Option<AccessValue>) -> Self {
        self.registry = self.registry.declare(name, value);
        self
    }

    /// Declare several explicit permissions in order
    pub fn permissions<I, N>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = (N, AccessValue)>,
        N: Into<String>,
    {
        self.registry = self.registry.permissions(permissions);
        self
    }

    /// Minimum access width
    pub fn access_bits(mut self, bits: AccessBits) -> Self {
        self.registry = self.registry.access_bits(bits);
        self
    }

    /// Replace the derived mask entirely
    pub fn access_mask(mut self, mask: AccessValue) -> Self {
        self.registry = self.registry.access_mask(mask);
        self
    }

    /// Register a group by id
    pub fn group(mut self, name: impl Into<String>, id: GroupId) -> Self {
        self.registry = self.registry.group(name, id);
        self
    }

    /// Register a group with lifecycle metadata
    pub fn group_definition(mut self, name: impl Into<String>, definition: GroupDefinition) -> Self {
        self.registry = self.registry.group_definition(name, definition);
        self
    }

    /// Define a named permission set
    pub fn permission_set<I, S>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets.define(name, members);
        self
    }

    /// Bit values for the standard access checks
    pub fn standard_access(mut self, standard: StandardAccess) -> Self {
        self.standard = standard;
        self
    }

    /// Build the registry and assemble the codec
    pub fn build(self) -> RegistryResult<BitmaskCodec> {
        let registry = self.registry.build()?;
        Ok(BitmaskCodec::from_parts(registry, self.sets).with_standard_access(self.standard))
    }
}
