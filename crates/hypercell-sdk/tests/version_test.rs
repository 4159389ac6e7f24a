// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! ApiVersion parsing and ordering tests.

use hypercell_sdk::{ApiVersion, Error};

#[test]
fn test_ordering_is_lexicographic_over_the_triple() {
    let ordered = [
        "1.0.0",
        "1.0.1",
        "1.1.0",
        "1.1.latest",
        "1.latest.0",
        "2.0.0",
        "2.0.latest",
        "2.latest.latest",
        "latest.0.0",
    ];
    for window in ordered.windows(2) {
        let lower: ApiVersion = window[0].parse().unwrap();
        let higher: ApiVersion = window[1].parse().unwrap();
        assert!(lower < higher, "{lower} should order before {higher}");
        assert!(higher > lower);
    }
}

#[test]
fn test_parse_display_round_trip() {
    for text in ["1.2.3", "4.5.latest", "latest.latest.latest", "0.0.0"] {
        let version: ApiVersion = text.parse().unwrap();
        assert_eq!(version.to_string(), text);
        assert_eq!(version.to_string().parse::<ApiVersion>().unwrap(), version);
    }
}

#[test]
fn test_equal_strings_parse_equal() {
    let a: ApiVersion = "3.0.5".parse().unwrap();
    let b: ApiVersion = "3.0.5".parse().unwrap();
    assert_eq!(a, b);
    assert_eq!(a, ApiVersion::new(3, 0, 5));
}

#[test]
fn test_malformed_versions_fail_construction() {
    for text in ["", "1", "1.2", "1.2.3.4", "a.b.c", "1..3", "1.2.x", "1.2.-3", "Latest.0.0"] {
        let result = text.parse::<ApiVersion>();
        assert!(
            matches!(result, Err(Error::VersionFormat(_))),
            "{text:?} should fail with a format error"
        );
    }
}

#[test]
fn test_partial_versions_pad_with_supplied_default() {
    let open = ApiVersion::parse_with_default("4.5", "latest").unwrap();
    assert_eq!(open, "4.5.latest".parse::<ApiVersion>().unwrap());

    let closed = ApiVersion::parse_with_default("4", "0").unwrap();
    assert_eq!(closed, ApiVersion::new(4, 0, 0));

    let full = ApiVersion::parse_with_default("4.5.6", "latest").unwrap();
    assert_eq!(full, ApiVersion::new(4, 5, 6));

    assert!(ApiVersion::parse_with_default("4.5.6.7", "latest").is_err());
    assert!(ApiVersion::parse_with_default("", "latest").is_err());
}

#[test]
fn test_string_comparisons_auto_coerce() {
    let version = ApiVersion::new(3, 0, 5);
    assert!(version == "3.0.5");
    assert!(version != "3.1.0");
    assert!(version < "3.0.latest");
    assert!(version >= "3.0.0");
    assert!(version > "2.9.9");
}

#[test]
fn test_latest_is_an_upper_bound() {
    assert!(ApiVersion::new(999, 999, 999) < ApiVersion::LATEST);
    assert_eq!(ApiVersion::LATEST.to_string(), "latest.latest.latest");
}
