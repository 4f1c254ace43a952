/*!
 * String Form Tests
 */

use permbits::codec::BitmaskCodec;
use pretty_assertions::assert_eq;

fn codec() -> BitmaskCodec {
    BitmaskCodec::builder()
        .permissions([("VIEW", 1), ("EDIT", 2), ("DELETE", 4), ("SHARE", 8), ("PRINT", 16)])
        .access_bits(6)
        .group("DOCUMENTS", 1)
        .group("PHOTOS", 2)
        .group("VIDEOS", 3)
        .permission_set("EDITOR", ["VIEW", "EDIT"])
        .build()
        .unwrap()
}

#[test]
fn test_string_round_trip() {
    let codec = codec();
    let bitmask = codec.create("DOCUMENTS", ["VIEW", "EDIT"]);
    assert_eq!(codec.to_string(bitmask), "DOCUMENTS:VIEW,EDIT");
    assert_eq!(codec.from_string("DOCUMENTS:VIEW,EDIT"), bitmask);
}

#[test]
fn test_all_and_wildcard_forms() {
    let codec = codec();
    let all = codec.from_string("PHOTOS:ALL");
    assert!(codec.can_everything(all));
    assert_eq!(codec.group_of(all), 2);
    assert_eq!(codec.from_string("PHOTOS:*"), all);
    assert_eq!(codec.to_string(all), "PHOTOS:ALL");

    // Inside a list, ALL is the registered ALL value, not the full mask
    assert_eq!(codec.from_string("PHOTOS:VIEW,ALL"), (2 << 6) | 31);
}

#[test]
fn test_empty_permission_list() {
    let codec = codec();
    let bitmask = codec.from_string("VIDEOS:");
    assert_eq!(codec.group_of(bitmask), 3);
    assert_eq!(codec.access_of(bitmask), 0);
    assert_eq!(codec.to_string(bitmask), "VIDEOS:NONE");
}

#[test]
fn test_lenient_parsing() {
    let codec = codec();
    assert_eq!(codec.from_string(" DOCUMENTS : VIEW , , EDIT "), 67);
    assert_eq!(codec.from_string("DOCUMENTS:VIEW,BOGUS"), 65);
    assert_eq!(codec.from_string("DOCUMENTS"), 64);
    assert_eq!(codec.from_string(":VIEW"), 0);
    assert_eq!(codec.from_string("7:VIEW"), (7 << 6) | 1);
    assert_eq!(codec.from_string("UNKNOWN:VIEW"), 1);
}

#[test]
fn test_permission_sets_in_string_form() {
    let codec = codec();
    assert_eq!(codec.from_string("DOCUMENTS:EDITOR"), codec.create("DOCUMENTS", ["VIEW", "EDIT"]));
    assert_eq!(codec.from_string("DOCUMENTS:EDITOR,PRINT"), 64 | 1 | 2 | 16);
}

#[test]
fn test_unregistered_group_renders_numeric_label() {
    let codec = codec();
    assert_eq!(codec.to_string((9 << 6) | 4), "9:DELETE");
}
