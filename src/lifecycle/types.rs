/*!
 * Lifecycle Types
 * Deprecation metadata, migration rules and migration results
 */

use crate::core::serde::is_none;
use crate::core::types::Bitmask;
use serde::{Deserialize, Serialize};

/// Options accepted by [`super::GroupLifecycle::deprecate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprecationOptions {
    pub replaced_by: Option<String>,
    pub since: Option<String>,
    pub message: Option<String>,
}

impl DeprecationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replaced_by(mut self, group: impl Into<String>) -> Self {
        self.replaced_by = Some(group.into());
        self
    }

    pub fn since(mut self, version: impl Into<String>) -> Self {
        self.since = Some(version.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Deprecation details of one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DeprecationInfo {
    pub group: String,
    #[serde(default, skip_serializing_if = "is_none")]
    pub since: Option<String>,
    #[serde(default, skip_serializing_if = "is_none")]
    pub replaced_by: Option<String>,
    pub message: String,
}

/// Remap rule from a deprecated group to its replacement
///
/// Without a permission mapping the access field carries over untouched.
/// With one, only mapped permissions survive: each set source permission
/// sets its target permission and every other bit is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupMigration {
    pub source_group: String,
    pub target_group: String,
    #[serde(
        default,
        with = "crate::core::serde::ordered_pairs_opt",
        skip_serializing_if = "is_none"
    )]
    pub permission_mapping: Option<Vec<(String, String)>>,
}

impl GroupMigration {
    pub fn new(source_group: impl Into<String>, target_group: impl Into<String>) -> Self {
        Self {
            source_group: source_group.into(),
            target_group: target_group.into(),
            permission_mapping: None,
        }
    }

    /// Map a source permission name onto a target permission name
    pub fn map(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.permission_mapping
            .get_or_insert_with(Vec::new)
            .push((source.into(), target.into()));
        self
    }

    pub fn matches(&self, source_group: &str, target_group: &str) -> bool {
        self.source_group == source_group && self.target_group == target_group
    }
}

/// Outcome of migrating one bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MigrationResult {
    pub original_value: Bitmask,
    pub migrated_value: Bitmask,
    pub was_migrated: bool,
}

impl MigrationResult {
    pub(crate) fn unchanged(value: Bitmask) -> Self {
        Self {
            original_value: value,
            migrated_value: value,
            was_migrated: false,
        }
    }
}
