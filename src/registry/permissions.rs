/*!
 * Permission Registry
 * Named permission values, auto bit-assignment and capacity validation
 */

use super::groups::{GroupDefinition, GroupTable};
use crate::core::limits::{ALL_PERMISSION, DEFAULT_ACCESS_BITS};
use crate::core::types::{AccessBits, AccessValue, GroupId};
use crate::core::{RegistryError, RegistryResult};
use crate::layout::{derive_required_bits, BitLayout};
use ahash::RandomState;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Permission and group registry bound to one [`BitLayout`]
///
/// Permissions iterate in declaration order. `ALL` is kept apart from the
/// other entries: it is either supplied explicitly or derived as the OR of
/// every other value (the full mask when that OR is zero).
#[derive(Debug, Clone)]
pub struct PermissionRegistry {
    layout: BitLayout,
    entries: Vec<(String, AccessValue)>,
    index: HashMap<String, usize, RandomState>,
    all_value: AccessValue,
    all_explicit: bool,
    groups: GroupTable,
}

impl PermissionRegistry {
    /// Start a builder with no permissions or groups
    pub fn builder() -> PermissionRegistryBuilder {
        PermissionRegistryBuilder::new()
    }

    /// Access width and mask
    pub fn layout(&self) -> &BitLayout {
        &self.layout
    }

    /// Number of low-order access bits
    pub fn access_bits(&self) -> AccessBits {
        self.layout.access_bits()
    }

    /// Mask over the access field
    pub fn access_mask(&self) -> AccessValue {
        self.layout.access_mask()
    }

    /// Add or overwrite a permission
    ///
    /// Registering `ALL` pins its value; otherwise a derived `ALL` is
    /// recomputed to cover the new entry.
    pub fn register(&mut self, name: impl Into<String>, value: AccessValue) -> RegistryResult<()> {
        let name = name.into();
        self.check_capacity(&name, value)?;

        if name == ALL_PERMISSION {
            self.all_value = value;
            self.all_explicit = true;
        } else {
            match self.index.get(&name) {
                Some(&position) => self.entries[position].1 = value,
                None => {
                    self.index.insert(name.clone(), self.entries.len());
                    self.entries.push((name.clone(), value));
                }
            }
            if !self.all_explicit {
                self.all_value = derived_all(&self.entries, self.layout.access_mask());
            }
        }

        debug!("Registered permission {} = {:#b}", name, value);
        Ok(())
    }

    /// Register a permission on the smallest power of two no other entry uses
    pub fn register_auto(&mut self, name: impl Into<String>) -> RegistryResult<AccessValue> {
        let name = name.into();
        let taken: HashSet<AccessValue, RandomState> =
            self.entries.iter().map(|(_, value)| *value).collect();
        let mut candidate = 1u64;
        let value = next_free_bit(&mut candidate, &taken, self.access_mask()).ok_or_else(|| {
            RegistryError::AutoAssignExhausted {
                name: name.clone(),
                mask: self.access_mask(),
                bits: self.access_bits(),
            }
        })?;
        self.register(name, value)?;
        Ok(value)
    }

    /// Value of `name`, or `0` for unknown names
    pub fn value_of(&self, name: &str) -> AccessValue {
        if name == ALL_PERMISSION {
            return self.all_value;
        }
        match self.index.get(name) {
            Some(&position) => self.entries[position].1,
            None => {
                debug!("Unknown permission '{}' resolves to 0", name);
                0
            }
        }
    }

    /// Whether `name` is registered; `ALL` always is
    pub fn contains(&self, name: &str) -> bool {
        name == ALL_PERMISSION || self.index.contains_key(name)
    }

    /// Stored value of `ALL`
    pub fn all_value(&self) -> AccessValue {
        self.all_value
    }

    /// Non-`ALL` permissions in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, AccessValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Non-`ALL` permission names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of non-`ALL` permissions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no non-`ALL` permission is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register or re-point a group name at `id`
    pub fn register_group(&mut self, name: impl Into<String>, id: GroupId) {
        let name = name.into();
        debug!("Registered group {} = {}", name, id);
        self.groups.register(name, id);
    }

    /// Id of a registered group
    pub fn group_id(&self, name: &str) -> Option<GroupId> {
        self.groups.id(name)
    }

    /// Most recently registered name for a group id
    pub fn group_name(&self, id: GroupId) -> Option<&str> {
        self.groups.name(id)
    }

    /// Group table with lifecycle metadata
    pub fn groups(&self) -> &GroupTable {
        &self.groups
    }

    pub(crate) fn groups_mut(&mut self) -> &mut GroupTable {
        &mut self.groups
    }

    fn check_capacity(&self, name: &str, value: AccessValue) -> RegistryResult<()> {
        check_capacity(&self.layout, name, value)
    }
}

fn check_capacity(layout: &BitLayout, name: &str, value: AccessValue) -> RegistryResult<()> {
    if value <= layout.access_mask() {
        return Ok(());
    }
    let needed = derive_required_bits([value], 1);
    Err(RegistryError::CapacityExceeded {
        name: name.to_string(),
        value,
        mask: layout.access_mask(),
        bits: layout.access_bits(),
        required_bits: (needed > layout.access_bits()).then_some(needed),
    })
}

fn derived_all(entries: &[(String, AccessValue)], mask: AccessValue) -> AccessValue {
    match entries.iter().fold(0, |acc, (_, value)| acc | value) {
        0 => mask,
        combined => combined,
    }
}

/// Advance `candidate` to the next power of two not in `taken` and claim it
fn next_free_bit(
    candidate: &mut u64,
    taken: &HashSet<AccessValue, RandomState>,
    mask: AccessValue,
) -> Option<AccessValue> {
    let mask = u64::from(mask);
    while *candidate <= mask && taken.contains(&(*candidate as AccessValue)) {
        *candidate <<= 1;
    }
    if *candidate > mask {
        return None;
    }
    let value = *candidate as AccessValue;
    *candidate <<= 1;
    Some(value)
}

/// Builder for [`PermissionRegistry`]
///
/// Permissions are either explicit (`Some(value)`) or left for auto-assignment
/// (`None`). `build` sizes the access field from the explicit values, widening
/// a too-small `access_bits` with a warning rather than failing.
#[derive(Debug, Clone, Default)]
pub struct PermissionRegistryBuilder {
    permissions: Vec<(String, Option<AccessValue>)>,
    access_bits: Option<AccessBits>,
    access_mask: Option<AccessValue>,
    groups: Vec<(String, GroupDefinition)>,
}

impl PermissionRegistryBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a permission with an explicit value
    pub fn permission(self, name: impl Into<String>, value: AccessValue) -> Self {
        self.declare(name, Some(value))
    }

    /// Declare a permission whose bit is chosen at build time
    pub fn auto_permission(self, name: impl Into<String>) -> Self {
        self.declare(name, None)
    }

    /// Declare a permission, `None` meaning auto-assigned
    ///
    /// Redeclaring a name replaces its value in place.
    pub fn declare(mut self, name: impl Into<String>, value: Option<AccessValue>) -> Self {
        let name = name.into();
        match self.permissions.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.permissions.push((name, value)),
        }
        self
    }

    /// Declare several explicit permissions in order
    pub fn permissions<I, N>(self, permissions: I) -> Self
    where
        I: IntoIterator<Item = (N, AccessValue)>,
        N: Into<String>,
    {
        permissions
            .into_iter()
            .fold(self, |builder, (name, value)| builder.permission(name, value))
    }

    /// Minimum access width
    pub fn access_bits(mut self, bits: AccessBits) -> Self {
        self.access_bits = Some(bits);
        self
    }

    /// Replace the derived mask entirely
    pub fn access_mask(mut self, mask: AccessValue) -> Self {
        self.access_mask = Some(mask);
        self
    }

    /// Register a group by id
    pub fn group(self, name: impl Into<String>, id: GroupId) -> Self {
        self.group_definition(name, GroupDefinition::new(id))
    }

    /// Register a group with lifecycle metadata
    pub fn group_definition(mut self, name: impl Into<String>, definition: GroupDefinition) -> Self {
        self.groups.push((name.into(), definition));
        self
    }

    /// Size the access field, assign automatic bits and validate capacity
    pub fn build(self) -> RegistryResult<PermissionRegistry> {
        let explicit_values: Vec<AccessValue> = self
            .permissions
            .iter()
            .filter(|(name, _)| name != ALL_PERMISSION)
            .filter_map(|(_, value)| *value)
            .collect();

        let required_bits = derive_required_bits(explicit_values.iter().copied(), DEFAULT_ACCESS_BITS);
        let access_bits = match self.access_bits {
            Some(bits) if bits < required_bits => {
                warn!(
                    "accessBits {} is too small for the declared permissions, using {} bits",
                    bits, required_bits
                );
                required_bits
            }
            Some(bits) => bits,
            None => DEFAULT_ACCESS_BITS.max(required_bits),
        };

        let layout = match self.access_mask {
            Some(mask) => BitLayout::with_mask(access_bits, mask)?,
            None => BitLayout::new(access_bits)?,
        };
        let mask = layout.access_mask();

        // Explicit values first, auto-assigned bits fill the gaps in declaration order
        let taken: HashSet<AccessValue, RandomState> = explicit_values.iter().copied().collect();
        let mut candidate = 1u64;
        let mut explicit_all = None;
        let mut entries = Vec::with_capacity(self.permissions.len());

        for (name, value) in self.permissions {
            if name == ALL_PERMISSION {
                explicit_all = value;
                continue;
            }
            let value = match value {
                Some(value) => value,
                None => next_free_bit(&mut candidate, &taken, mask).ok_or_else(|| {
                    RegistryError::AutoAssignExhausted {
                        name: name.clone(),
                        mask,
                        bits: access_bits,
                    }
                })?,
            };
            entries.push((name, value));
        }

        let all_value = explicit_all.unwrap_or_else(|| derived_all(&entries, mask));

        for (name, value) in &entries {
            check_capacity(&layout, name, *value)?;
        }
        check_capacity(&layout, ALL_PERMISSION, all_value)?;

        let index = entries
            .iter()
            .enumerate()
            .map(|(position, (name, _))| (name.clone(), position))
            .collect();

        let mut groups = GroupTable::new();
        for (name, definition) in self.groups {
            groups.register_definition(name, definition);
        }

        debug!(
            "Built permission registry: {} permissions, {} groups, {} access bits, mask {:#x}",
            entries.len(),
            groups.len(),
            access_bits,
            mask
        );

        Ok(PermissionRegistry {
            layout,
            entries,
            index,
            all_value,
            all_explicit: explicit_all.is_some(),
            groups,
        })
    }
}
