/*!
 * Access Query
 * The check consumed by request-handling middleware
 */

use crate::core::types::{AccessValue, Bitmask, GroupId};
use crate::layout::BitLayout;

/// True iff some bitmask belongs to `group` and shares a bit with `access_flag`
pub fn has_required_permission(
    layout: &BitLayout,
    bitmasks: &[Bitmask],
    group: GroupId,
    access_flag: AccessValue,
) -> bool {
    bitmasks.iter().any(|bitmask| {
        layout.split_group(*bitmask) == group && layout.split_access(*bitmask) & access_flag != 0
    })
}
