/*!
 * Group Table
 * Bidirectional group name <-> id mapping with lifecycle metadata
 */

use crate::core::serde::{is_false, is_none};
use crate::core::types::GroupId;
use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registered group and its lifecycle metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupDefinition {
    pub id: GroupId,
    #[serde(default, skip_serializing_if = "is_none")]
    pub since: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(default, alias = "deprecatedSince", skip_serializing_if = "is_none")]
    pub deprecated_since: Option<String>,
    #[serde(default, alias = "replacedBy", skip_serializing_if = "is_none")]
    pub replaced_by: Option<String>,
    #[serde(default, skip_serializing_if = "is_none")]
    pub message: Option<String>,
}

impl GroupDefinition {
    pub fn new(id: GroupId) -> Self {
        Self {
            id,
            since: None,
            deprecated: false,
            deprecated_since: None,
            replaced_by: None,
            message: None,
        }
    }

    /// Version the group was introduced in
    pub fn with_since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }
}

impl From<GroupId> for GroupDefinition {
    fn from(id: GroupId) -> Self {
        Self::new(id)
    }
}

/// Group registry, iterated in registration order
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    order: Vec<String>,
    by_name: HashMap<String, GroupDefinition, RandomState>,
    by_id: HashMap<GroupId, String, RandomState>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or re-point a group name at `id`
    ///
    /// Re-registering an existing name keeps its lifecycle metadata. When two
    /// names share an id, reverse lookup returns the most recent one.
    pub fn register(&mut self, name: impl Into<String>, id: GroupId) {
        let name = name.into();
        let definition = match self.by_name.get(&name) {
            Some(existing) => GroupDefinition {
                id,
                ..existing.clone()
            },
            None => GroupDefinition::new(id),
        };
        self.register_definition(name, definition);
    }

    /// Register a group with full metadata, replacing any previous definition
    pub fn register_definition(&mut self, name: impl Into<String>, definition: GroupDefinition) {
        let name = name.into();
        let id = definition.id;

        match self.by_name.insert(name.clone(), definition) {
            Some(previous) if previous.id != id => {
                if self.by_id.get(&previous.id) == Some(&name) {
                    self.by_id.remove(&previous.id);
                }
            }
            Some(_) => {}
            None => self.order.push(name.clone()),
        }
        self.by_id.insert(id, name);
    }

    pub fn id(&self, name: &str) -> Option<GroupId> {
        self.by_name.get(name).map(|def| def.id)
    }

    pub fn name(&self, id: GroupId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub fn definition(&self, name: &str) -> Option<&GroupDefinition> {
        self.by_name.get(name)
    }

    pub(crate) fn definition_mut(&mut self, name: &str) -> Option<&mut GroupDefinition> {
        self.by_name.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Groups in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupDefinition)> {
        self.order
            .iter()
            .filter_map(|name| self.by_name.get(name).map(|def| (name.as_str(), def)))
    }
}
