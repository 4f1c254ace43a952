/*!
 * String Form
 * `"<group>:<perm,perm,...>"` rendering and parsing
 */

use super::bitmask::BitmaskCodec;
use crate::core::limits::{ALL_PERMISSION, ALL_WILDCARD, GROUP_SEPARATOR, NONE_TOKEN, PERMISSION_SEPARATOR};
use crate::core::types::{AccessValue, Bitmask, GroupId};

impl BitmaskCodec {
    /// Render a bitmask as `"<group>:<permissions>"`
    ///
    /// The group label is the registered name or the decimal id. The
    /// permission part is `ALL` for a full mask, `NONE` when no named
    /// permission is set, otherwise the set names in registry order.
    pub fn to_string(&self, bitmask: Bitmask) -> String {
        let layout = self.layout();
        let group = layout.split_group(bitmask);
        let access = layout.split_access(bitmask);

        let label = match self.registry().group_name(group) {
            Some(name) => name.to_string(),
            None => group.to_string(),
        };

        let permissions = if layout.is_full(access) {
            ALL_PERMISSION.to_string()
        } else {
            let names: Vec<&str> = self
                .registry()
                .iter()
                .filter(|(_, value)| access & value != 0)
                .map(|(name, _)| name)
                .collect();
            if names.is_empty() {
                NONE_TOKEN.to_string()
            } else {
                names.join(PERMISSION_SEPARATOR)
            }
        };

        format!("{}{}{}", label, GROUP_SEPARATOR, permissions)
    }

    /// Parse the string form back into a bitmask
    ///
    /// Never fails: unknown groups resolve to `0`, unknown permission names
    /// contribute no bits, and an empty group label yields `0` outright.
    /// Only a list that is exactly `*` or `ALL` grants the full mask; an
    /// `ALL` token among others contributes the registry's `ALL` value.
    pub fn from_string(&self, text: &str) -> Bitmask {
        let (label, permissions) = text.split_once(GROUP_SEPARATOR).unwrap_or((text, ""));
        let label = label.trim();
        if label.is_empty() {
            return 0;
        }

        let group = self.resolve_label(label);
        let access = self.parse_permission_list(permissions.trim());
        self.layout().combine(group, access)
    }

    fn resolve_label(&self, label: &str) -> GroupId {
        self.registry()
            .group_id(label)
            .or_else(|| label.parse().ok())
            .unwrap_or(0)
    }

    fn parse_permission_list(&self, list: &str) -> AccessValue {
        match list {
            "" => 0,
            ALL_WILDCARD | ALL_PERMISSION => self.layout().access_mask(),
            _ => list
                .split(PERMISSION_SEPARATOR)
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .fold(0, |acc, token| acc | self.resolve_name(token)),
        }
    }
}
