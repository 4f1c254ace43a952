/*!
 * Permission Sets
 * Named aliases for lists of permission names, resolved lazily
 */

use super::permissions::PermissionRegistry;
use crate::core::types::AccessValue;
use ahash::RandomState;
use log::debug;
use std::collections::HashMap;

/// Named permission sets such as `EDITOR = [VIEW, EDIT]`
///
/// Members are stored verbatim and only resolved against a
/// [`PermissionRegistry`] when a grant is built, so a set may name
/// permissions that are registered later.
#[derive(Debug, Clone, Default)]
pub struct PermissionSetRegistry {
    order: Vec<String>,
    sets: HashMap<String, Vec<String>, RandomState>,
}

impl PermissionSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a set
    pub fn define<I, S>(&mut self, name: impl Into<String>, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let members: Vec<String> = members.into_iter().map(Into::into).collect();
        debug!("Defined permission set {} = {:?}", name, members);
        if self.sets.insert(name.clone(), members).is_none() {
            self.order.push(name);
        }
    }

    /// OR of the member values; unknown sets resolve to `0`
    pub fn resolve(&self, name: &str, registry: &PermissionRegistry) -> AccessValue {
        match self.sets.get(name) {
            Some(members) => members
                .iter()
                .fold(0, |acc, member| acc | registry.value_of(member)),
            None => {
                debug!("Unknown permission set '{}' resolves to 0", name);
                0
            }
        }
    }

    pub fn members(&self, name: &str) -> Option<&[String]> {
        self.sets.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// Set names in definition order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
