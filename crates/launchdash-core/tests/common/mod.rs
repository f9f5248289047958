//! Shared fixtures for launchdash-core integration tests.

#![allow(dead_code)]

use launchdash_core::LaunchTable;
use std::path::PathBuf;

/// Path to the bundled launch fixture.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("launches.csv")
}

/// The bundled launch fixture, loaded.
pub fn fixture_table() -> LaunchTable {
    LaunchTable::from_path(fixture_path()).expect("fixture should load")
}
