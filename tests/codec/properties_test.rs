/*!
 * Grant, Check and Capacity Tests
 */

use permbits::codec::BitmaskCodec;
use permbits::core::RegistryError;
use permbits::layout::BitLayout;
use permbits::registry::PermissionRegistry;
use permbits::{has_required_permission, Permission};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn documents_codec() -> BitmaskCodec {
    BitmaskCodec::builder()
        .permissions([("VIEW", 1), ("EDIT", 2), ("DELETE", 4), ("SHARE", 8), ("PRINT", 16)])
        .access_bits(6)
        .group("DOCUMENTS", 1)
        .group("PHOTOS", 2)
        .group("VIDEOS", 3)
        .build()
        .expect("documents schema is valid")
}

#[test]
fn test_mask_and_bits_consistency() {
    let registries = [
        PermissionRegistry::builder().build().unwrap(),
        PermissionRegistry::builder().permission("X", 1 << 12).build().unwrap(),
        PermissionRegistry::builder()
            .auto_permission("A")
            .auto_permission("B")
            .access_bits(9)
            .build()
            .unwrap(),
    ];

    for registry in &registries {
        assert_eq!(registry.access_mask(), (1u32 << registry.access_bits()) - 1);
        for (_, value) in registry.iter() {
            assert!(value <= registry.access_mask());
        }
        assert!(registry.all_value() <= registry.access_mask());
    }
}

#[test]
fn test_grant_check_consistency() {
    let codec = documents_codec();
    let bitmask = codec.create("DOCUMENTS", ["VIEW", "EDIT"]);
    assert_eq!(bitmask, 67);

    let parsed = codec.parse(67);
    assert_eq!(parsed.group, 1);
    assert_eq!(parsed.group_name.as_deref(), Some("DOCUMENTS"));
    assert_eq!(parsed.permissions.get("VIEW"), Some(&true));
    assert_eq!(parsed.permissions.get("EDIT"), Some(&true));
    assert_eq!(parsed.permissions.get("DELETE"), Some(&false));
}

#[test]
fn test_all_flag_dual_semantics() {
    let codec = documents_codec();
    // Raw ALL value is 31; the 6-bit mask is 63
    assert_eq!(codec.registry().all_value(), 31);

    let named = codec.create("DOCUMENTS", ["VIEW", "EDIT", "DELETE", "SHARE", "PRINT"]);
    assert!(codec.can(named, "ALL"), "raw ALL bits participate in checks");
    assert!(!codec.parse(named).is_set("ALL"), "parse reports ALL only for a full mask");

    let everything = codec.create("DOCUMENTS", [Permission::All]);
    assert!(codec.parse(everything).is_set("ALL"));
    assert!(codec.can_everything(everything));
}

#[test]
fn test_capacity_enforcement_at_construction() {
    let err = PermissionRegistry::builder()
        .permission("ADMIN", 16)
        .access_bits(3)
        .access_mask(7)
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::CapacityExceeded { value: 16, mask: 7, .. }));
    assert!(err.to_string().contains("exceeds the maximum value"));
}

#[test]
fn test_capacity_enforcement_at_registration() {
    let mut registry = PermissionRegistry::builder()
        .permissions([("VIEW", 1), ("EDIT", 2), ("DELETE", 4), ("SHARE", 8)])
        .access_bits(4)
        .build()
        .unwrap();
    assert_eq!(registry.access_mask(), 15);

    assert!(registry.register("FIFTEEN", 15).is_ok());

    let err = registry.register("SIXTEEN", 16).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("exceeds the maximum value 15"));
    assert!(msg.contains("16"));
    assert!(msg.contains("4 access bits"));
    assert!(msg.contains("at least 5 bits"));
}

#[test]
fn test_auto_assignment_exhaustion_names_permission() {
    let err = PermissionRegistry::builder()
        .auto_permission("ONE")
        .auto_permission("TWO")
        .auto_permission("THREE")
        .access_mask(3)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("'THREE'"));
}

#[test]
fn test_unknown_name_tolerance() {
    let codec = documents_codec();
    let bitmask = codec.create("NON_EXISTENT", ["VIEW"]);
    assert_eq!(codec.group_of(bitmask), 0);
    assert!(codec.can(bitmask, "VIEW"));
    assert!(!codec.can(bitmask, "UNREGISTERED"));
    assert!(!codec.can(u32::MAX, "UNREGISTERED"));
    assert_eq!(codec.create("DOCUMENTS", ["NOPE"]), 1 << 6);
}

#[test]
fn test_middleware_contract() {
    let codec = documents_codec();
    let held = [
        codec.create("DOCUMENTS", ["VIEW"]),
        codec.create("PHOTOS", ["EDIT", "DELETE"]),
    ];

    assert!(codec.has_required_permission(&held, 1, 1));
    assert!(codec.has_required_permission(&held, 2, 4 | 16));
    assert!(!codec.has_required_permission(&held, 1, 2));
    assert!(!codec.has_required_permission(&held, 3, 63));
    assert!(!has_required_permission(codec.layout(), &[], 1, 1));
}

proptest! {
    #[test]
    fn prop_combine_split_inverse(bits in 1u32..=20, group in 0u32..2048, access in any::<u32>()) {
        let layout = BitLayout::new(bits).unwrap();
        let access = access & layout.access_mask();
        let bitmask = layout.combine(group, access);
        prop_assert_eq!(layout.split_group(bitmask), group);
        prop_assert_eq!(layout.split_access(bitmask), access);
    }

    #[test]
    fn prop_create_then_parse_reports_exact_grants(selection in proptest::collection::vec(any::<bool>(), 5)) {
        let codec = documents_codec();
        let names = ["VIEW", "EDIT", "DELETE", "SHARE", "PRINT"];
        let granted: Vec<&str> = names
            .iter()
            .zip(&selection)
            .filter(|(_, chosen)| **chosen)
            .map(|(name, _)| *name)
            .collect();

        let parsed = codec.parse(codec.create("PHOTOS", granted.iter().copied()));
        prop_assert_eq!(parsed.group, 2);
        for (name, chosen) in names.iter().zip(&selection) {
            prop_assert_eq!(parsed.is_set(name), *chosen);
        }
    }
}
