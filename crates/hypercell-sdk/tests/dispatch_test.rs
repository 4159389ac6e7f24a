// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Version-dispatch registry tests.

use hypercell_sdk::{ApiVersion, Error, VersionMap, VersionRange};

fn registry() -> VersionMap<&'static str> {
    let mut ops = VersionMap::new();
    ops.register(
        "get_widget",
        VersionRange::parse("2.0", "3.0.5").unwrap(),
        "legacy",
    )
    .unwrap();
    ops.register("get_widget", VersionRange::at_least("3.1").unwrap(), "modern")
        .unwrap();
    ops
}

fn version(text: &str) -> ApiVersion {
    text.parse().unwrap()
}

#[test]
fn test_resolves_the_range_containing_the_version() {
    let ops = registry();
    assert_eq!(*ops.resolve("get_widget", &version("2.0.0")).unwrap(), "legacy");
    assert_eq!(*ops.resolve("get_widget", &version("3.0.5")).unwrap(), "legacy");
    assert_eq!(*ops.resolve("get_widget", &version("3.1.0")).unwrap(), "modern");
    assert_eq!(*ops.resolve("get_widget", &version("4.0.0")).unwrap(), "modern");
    assert_eq!(
        *ops.resolve("get_widget", &version("latest.0.0")).unwrap(),
        "modern"
    );
}

#[test]
fn test_version_gap_is_a_dispatch_miss() {
    let ops = registry();
    let err = ops.resolve("get_widget", &version("3.0.6")).unwrap_err();
    match err {
        Error::DispatchMiss { operation, version } => {
            assert_eq!(operation, "get_widget");
            assert_eq!(version, "3.0.6");
        }
        other => panic!("expected DispatchMiss, got {other:?}"),
    }
}

#[test]
fn test_version_below_all_ranges_is_a_dispatch_miss() {
    let ops = registry();
    assert!(matches!(
        ops.resolve("get_widget", &version("1.9.0")),
        Err(Error::DispatchMiss { .. })
    ));
}

#[test]
fn test_unknown_operation_is_a_dispatch_miss() {
    let ops = registry();
    assert!(matches!(
        ops.resolve("delete_widget", &version("3.1.0")),
        Err(Error::DispatchMiss { .. })
    ));
}

#[test]
fn test_overlapping_registration_is_a_configuration_error() {
    let mut ops: VersionMap<&'static str> = VersionMap::new();
    ops.register("op", VersionRange::parse("2.0", "3.0").unwrap(), "a")
        .unwrap();
    let err = ops
        .register("op", VersionRange::parse("3.0", "4.0").unwrap(), "b")
        .unwrap_err();
    assert!(matches!(err, Error::DispatchConflict { operation } if operation == "op"));
}

#[test]
fn test_same_range_on_different_operations_is_fine() {
    let mut ops: VersionMap<&'static str> = VersionMap::new();
    let range = VersionRange::at_least("2.0").unwrap();
    ops.register("first", range, "a").unwrap();
    ops.register("second", range, "b").unwrap();
    assert_eq!(*ops.resolve("first", &version("2.5.0")).unwrap(), "a");
    assert_eq!(*ops.resolve("second", &version("2.5.0")).unwrap(), "b");
}

#[test]
fn test_resolution_tracks_a_changing_version() {
    let ops = registry();
    // Same registry, different versions per call: nothing is cached.
    assert_eq!(*ops.resolve("get_widget", &version("2.5.0")).unwrap(), "legacy");
    assert_eq!(*ops.resolve("get_widget", &version("5.0.0")).unwrap(), "modern");
    assert_eq!(*ops.resolve("get_widget", &version("2.5.0")).unwrap(), "legacy");
}

#[test]
fn test_range_containment_is_inclusive_on_both_ends() {
    let range = VersionRange::parse("2.0", "3.0").unwrap();
    assert!(range.contains(&version("2.0.0")));
    assert!(range.contains(&version("3.0.latest")));
    assert!(!range.contains(&version("1.latest.latest")));
    assert!(!range.contains(&version("3.1.0")));
}
