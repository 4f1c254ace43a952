/*!
 * Configuration Types
 * Serde model of the one-time codec setup
 */

use crate::codec::StandardAccess;
use crate::core::serde::{is_empty_vec, is_none, ordered_pairs};
use crate::core::types::{AccessBits, AccessValue, GroupId};
use crate::registry::GroupDefinition;
use serde::{Deserialize, Serialize};

/// Group entry: a bare id or a full definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupSpec {
    Id(GroupId),
    Definition(GroupDefinition),
}

impl GroupSpec {
    /// Bare ids become `{ id }`
    pub fn into_definition(self) -> GroupDefinition {
        match self {
            GroupSpec::Id(id) => GroupDefinition::new(id),
            GroupSpec::Definition(definition) => definition,
        }
    }
}

/// Codec configuration
///
/// ```json
/// {
///   "permissions": { "VIEW": 1, "EDIT": 2, "EXPORT": null },
///   "access_bits": 6,
///   "groups": { "DOCUMENTS": 1, "LEGACY": { "id": 9, "since": "1.0.0" } },
///   "permission_sets": { "EDITOR": ["VIEW", "EDIT"] }
/// }
/// ```
///
/// A `null` permission value is auto-assigned. Maps keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CodecConfig {
    #[serde(default, with = "ordered_pairs", skip_serializing_if = "is_empty_vec")]
    pub permissions: Vec<(String, Option<AccessValue>)>,
    #[serde(default, alias = "accessBits", skip_serializing_if = "is_none")]
    pub access_bits: Option<AccessBits>,
    #[serde(default, alias = "accessMask", skip_serializing_if = "is_none")]
    pub access_mask: Option<AccessValue>,
    #[serde(default, with = "ordered_pairs", skip_serializing_if = "is_empty_vec")]
    pub groups: Vec<(String, GroupSpec)>,
    #[serde(
        default,
        alias = "permissionSets",
        with = "ordered_pairs",
        skip_serializing_if = "is_empty_vec"
    )]
    pub permission_sets: Vec<(String, Vec<String>)>,
    #[serde(default, alias = "standardAccess", skip_serializing_if = "is_none")]
    pub standard_access: Option<StandardAccess>,
}
