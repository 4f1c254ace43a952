/*!
 * Codec Types
 * Permission and group references, parse results and standard access flags
 */

use crate::core::limits::ALL_PERMISSION;
use crate::core::serde::is_none;
use crate::core::types::{AccessValue, GroupId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Permission requested in a grant
///
/// `All` always grants the full access mask. Converting the string `"ALL"`
/// yields `All`, never a named lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Permission or permission-set name
    Named(String),
    /// Every access bit
    All,
}

impl Permission {
    pub fn named(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }
}

impl From<&str> for Permission {
    fn from(name: &str) -> Self {
        if name == ALL_PERMISSION {
            Permission::All
        } else {
            Permission::Named(name.to_string())
        }
    }
}

impl From<String> for Permission {
    fn from(name: String) -> Self {
        if name == ALL_PERMISSION {
            Permission::All
        } else {
            Permission::Named(name)
        }
    }
}

impl From<&String> for Permission {
    fn from(name: &String) -> Self {
        Self::from(name.as_str())
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Named(name) => f.write_str(name),
            Permission::All => f.write_str(ALL_PERMISSION),
        }
    }
}

/// Group given by registered name or by literal id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupRef {
    Id(GroupId),
    Name(String),
}

impl From<&str> for GroupRef {
    fn from(name: &str) -> Self {
        GroupRef::Name(name.to_string())
    }
}

impl From<String> for GroupRef {
    fn from(name: String) -> Self {
        GroupRef::Name(name)
    }
}

impl From<GroupId> for GroupRef {
    fn from(id: GroupId) -> Self {
        GroupRef::Id(id)
    }
}

/// Decoded view of a bitmask
///
/// Named flags are bit tests. The `ALL` flag is true only when the access
/// field equals the full mask, which differs from a bit test of `ALL`'s raw
/// value whenever the named permissions leave some mask bits uncovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ParsedBitmask {
    pub group: GroupId,
    #[serde(default, skip_serializing_if = "is_none")]
    pub group_name: Option<String>,
    pub access: AccessValue,
    pub permissions: BTreeMap<String, bool>,
}

impl ParsedBitmask {
    /// Flag for `name`; unknown names are false
    pub fn is_set(&self, name: &str) -> bool {
        self.permissions.get(name).copied().unwrap_or(false)
    }

    /// Names whose flag is true, `ALL` included
    pub fn granted(&self) -> impl Iterator<Item = &str> {
        self.permissions
            .iter()
            .filter(|(_, set)| **set)
            .map(|(name, _)| name.as_str())
    }
}

/// Bit values behind `can_read`, `can_write`, ...
///
/// These checks ignore the permission registry entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct StandardAccess {
    pub read: AccessValue,
    pub write: AccessValue,
    pub create: AccessValue,
    pub update: AccessValue,
    pub delete: AccessValue,
}

impl Default for StandardAccess {
    fn default() -> Self {
        Self {
            read: 1,
            write: 2,
            create: 4,
            update: 8,
            delete: 16,
        }
    }
}
