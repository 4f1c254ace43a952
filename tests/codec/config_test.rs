/*!
 * Configuration and Shared Codec Tests
 */

use permbits::codec::BitmaskCodec;
use permbits::core::{ConfigError, RegistryError};
use permbits::{CodecConfig, SharedCodec};
use pretty_assertions::assert_eq;
use std::thread;

const SCHEMA: &str = r#"{
    "permissions": { "VIEW": 1, "EDIT": 2, "EXPORT": null, "DELETE": 4 },
    "accessBits": 6,
    "groups": {
        "DOCUMENTS": 1,
        "LEGACY": { "id": 9, "deprecated": true, "replacedBy": "DOCUMENTS" }
    },
    "permissionSets": { "EDITOR": ["VIEW", "EDIT"] }
}"#;

#[test]
fn test_codec_from_json() {
    let codec = BitmaskCodec::from_json_str(SCHEMA).unwrap();

    assert_eq!(codec.registry().value_of("EXPORT"), 8);
    assert_eq!(codec.layout().access_bits(), 6);
    assert_eq!(codec.create("DOCUMENTS", ["EDITOR", "EXPORT"]), 64 | 1 | 2 | 8);
    assert!(codec.is_deprecated("LEGACY"));

    let legacy = codec.create("LEGACY", ["VIEW", "DELETE"]);
    let result = codec.migrate(legacy);
    assert!(result.was_migrated);
    assert_eq!(result.migrated_value, codec.create("DOCUMENTS", ["VIEW", "DELETE"]));
}

#[test]
fn test_config_capacity_violation() {
    let err = BitmaskCodec::from_json_str(
        r#"{ "permissions": { "ADMIN": 16 }, "accessBits": 3, "accessMask": 7 }"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Registry(RegistryError::CapacityExceeded { value: 16, .. })
    ));
}

#[test]
fn test_config_parse_error() {
    let err = CodecConfig::from_json_str(r#"{ "permissions": [1, 2] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_shared_codec_registration_visible_to_new_snapshots() {
    let shared = SharedCodec::new(BitmaskCodec::from_json_str(SCHEMA).unwrap());
    let before = shared.snapshot();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..1_000 {
                    let codec = shared.snapshot();
                    assert!(codec.can(codec.from_string("DOCUMENTS:VIEW"), "VIEW"));
                }
            })
        })
        .collect();

    shared
        .update(|codec| codec.register_permission("PRINT", 16))
        .unwrap();

    for reader in readers {
        reader.join().unwrap();
    }

    assert!(!before.registry().contains("PRINT"));
    let after = shared.snapshot();
    assert!(after.can(after.from_string("DOCUMENTS:PRINT"), "PRINT"));
}
