/*!
 * Packed Array Tests
 */

use permbits::core::PackError;
use permbits::{pack, unpack};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_round_trip_small_values() {
    let packed = pack(&[1, 2, 3, 4, 5], false);
    assert!(packed.starts_with('A'));
    assert_eq!(unpack(&packed, false).unwrap(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_width_class_selection() {
    assert!(pack(&[0, 1, 127, 255], false).starts_with('A'));
    assert!(pack(&[0, 256, 1000, 65535], false).starts_with('B'));
    assert!(pack(&[0, 65536, 1_000_000, 0xFFFF_FFFF], false).starts_with('C'));
}

#[test]
fn test_empty_sequences() {
    assert_eq!(pack(&[], true), "");
    assert_eq!(unpack("", true).unwrap(), Vec::<u32>::new());
}

#[test]
fn test_url_safe_alphabet() {
    let values = [0xFFFF_FFFF, 0xFBFF_FFFE, 62];
    let packed = pack(&values, true);
    assert!(!packed.contains(['+', '/', '=']));
    assert_eq!(unpack(&packed, true).unwrap(), values.to_vec());
}

#[test]
fn test_malformed_strings_are_rejected() {
    assert!(matches!(unpack("Z", false), Err(PackError::InvalidPrefix(_))));
    assert!(matches!(unpack("A!!!!", false), Err(PackError::InvalidBase64(_))));
    // Three bytes cannot hold whole 16-bit elements
    assert!(matches!(
        unpack("BAQID", false),
        Err(PackError::InvalidLength { len: 3, width: 2 })
    ));
}

proptest! {
    #[test]
    fn prop_round_trip(values in proptest::collection::vec(any::<u32>(), 0..64), url_safe in any::<bool>()) {
        let packed = pack(&values, url_safe);
        prop_assert_eq!(unpack(&packed, url_safe).unwrap(), values);
    }

    #[test]
    fn prop_round_trip_narrow(values in proptest::collection::vec(0u32..65536, 1..64), url_safe in any::<bool>()) {
        let packed = pack(&values, url_safe);
        prop_assert!(!packed.starts_with('C'));
        prop_assert_eq!(unpack(&packed, url_safe).unwrap(), values);
    }
}
