/*!
 * Group Deprecation and Migration Tests
 */

use permbits::codec::BitmaskCodec;
use permbits::core::LifecycleError;
use permbits::{DeprecationOptions, GroupMigration};
use pretty_assertions::assert_eq;

fn codec() -> BitmaskCodec {
    BitmaskCodec::builder()
        .permissions([
            ("VIEW", 1),
            ("EDIT", 2),
            ("DELETE", 4),
            ("READ", 8),
            ("UPDATE", 16),
        ])
        .access_bits(6)
        .group("OLD_DOCS", 1)
        .group("NEW_DOCS", 2)
        .group("ARCHIVE", 3)
        .build()
        .unwrap()
}

#[test]
fn test_migration_remap() {
    let mut codec = codec();
    codec
        .deprecate_group("OLD_DOCS", DeprecationOptions::new().replaced_by("NEW_DOCS").since("2.0.0"))
        .unwrap();
    codec
        .define_migration(
            GroupMigration::new("OLD_DOCS", "NEW_DOCS")
                .map("VIEW", "READ")
                .map("EDIT", "UPDATE"),
        )
        .unwrap();

    let original = codec.create("OLD_DOCS", ["VIEW", "EDIT"]);
    let result = codec.migrate(original);

    assert!(result.was_migrated);
    assert_eq!(result.original_value, original);
    assert_eq!(codec.group_of(result.migrated_value), 2);
    assert!(codec.can_all(result.migrated_value, ["READ", "UPDATE"]));
    assert!(!codec.can_any(result.migrated_value, ["VIEW", "EDIT"]));
}

#[test]
fn test_migration_drops_unmapped_bits() {
    let mut codec = codec();
    codec
        .deprecate_group("OLD_DOCS", DeprecationOptions::new().replaced_by("NEW_DOCS"))
        .unwrap();
    codec
        .define_migration(GroupMigration::new("OLD_DOCS", "NEW_DOCS").map("VIEW", "READ"))
        .unwrap();

    let result = codec.migrate(codec.create("OLD_DOCS", ["VIEW", "DELETE"]));
    assert_eq!(result.migrated_value, codec.create("NEW_DOCS", ["READ"]));
    assert!(!codec.can(result.migrated_value, "DELETE"));
}

#[test]
fn test_migration_without_mapping_passes_access_through() {
    let mut codec = codec();
    codec
        .deprecate_group("OLD_DOCS", DeprecationOptions::new().replaced_by("ARCHIVE"))
        .unwrap();

    let result = codec.migrate(codec.create("OLD_DOCS", ["VIEW", "DELETE"]));
    assert!(result.was_migrated);
    assert_eq!(result.migrated_value, codec.create("ARCHIVE", ["VIEW", "DELETE"]));
}

#[test]
fn test_last_matching_migration_wins() {
    let mut codec = codec();
    codec
        .deprecate_group("OLD_DOCS", DeprecationOptions::new().replaced_by("NEW_DOCS"))
        .unwrap();
    codec
        .define_migration(GroupMigration::new("OLD_DOCS", "NEW_DOCS").map("VIEW", "READ"))
        .unwrap();
    codec
        .define_migration(GroupMigration::new("OLD_DOCS", "ARCHIVE").map("VIEW", "DELETE"))
        .unwrap();
    codec
        .define_migration(GroupMigration::new("OLD_DOCS", "NEW_DOCS").map("VIEW", "UPDATE"))
        .unwrap();

    let result = codec.migrate(codec.create("OLD_DOCS", ["VIEW"]));
    assert_eq!(result.migrated_value, codec.create("NEW_DOCS", ["UPDATE"]));
}

#[test]
fn test_non_deprecated_groups_are_unchanged() {
    let codec = codec();
    let bitmask = codec.create("NEW_DOCS", ["READ"]);
    let results = codec.migrate_all(&[bitmask, 0]);

    assert_eq!(results.len(), 2);
    for (result, original) in results.iter().zip([bitmask, 0]) {
        assert!(!result.was_migrated);
        assert_eq!(result.migrated_value, original);
    }
}

#[test]
fn test_lifecycle_misuse_is_an_error() {
    let mut codec = codec();
    assert_eq!(
        codec.deprecate_group("GHOST", DeprecationOptions::new()),
        Err(LifecycleError::GroupNotFound("GHOST".to_string()))
    );
    assert_eq!(
        codec.define_migration(GroupMigration::new("OLD_DOCS", "GHOST")),
        Err(LifecycleError::GroupNotFound("GHOST".to_string()))
    );
}

#[test]
fn test_deprecation_queries() {
    let mut codec = codec();
    codec
        .deprecate_group("OLD_DOCS", DeprecationOptions::new().replaced_by("NEW_DOCS").since("2.0.0"))
        .unwrap();

    assert!(codec.is_deprecated("OLD_DOCS"));
    assert!(!codec.is_deprecated("NEW_DOCS"));
    assert!(!codec.is_deprecated("GHOST"));

    let info = codec.deprecation_info("OLD_DOCS").unwrap();
    assert_eq!(info.since.as_deref(), Some("2.0.0"));
    assert_eq!(info.replaced_by.as_deref(), Some("NEW_DOCS"));
    assert_eq!(info.message, "Group 'OLD_DOCS' is deprecated, use 'NEW_DOCS' instead");
    assert_eq!(codec.deprecated_groups(), vec![info]);
}
