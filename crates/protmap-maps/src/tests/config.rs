// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_MAX_FILE_PATH_LEN, DEFAULT_MAX_MAP_PATH_LEN, MapsConfig};
use crate::error::MapsError;

#[test]
fn test_default_targets_proc() {
    let config = MapsConfig::default();

    assert_eq!(config.proc_root(), Path::new("/proc"));
    assert_eq!(config.max_map_path_len, DEFAULT_MAX_MAP_PATH_LEN);
    assert_eq!(config.max_file_path_len, DEFAULT_MAX_FILE_PATH_LEN);
    assert!(config.dump_on_lookup);
}

#[test]
fn test_maps_path_joins_pid() {
    let path = MapsConfig::default()
        .maps_path(1234)
        .expect("Failed to maps_path(..)");

    assert_eq!(path, PathBuf::from("/proc/1234/maps"));
}

#[test]
fn test_maps_path_rejects_paths_at_bound() {
    // "/proc/1/maps" is 12 bytes.
    let config = MapsConfig::default().with_max_map_path_len(12);

    let result = config.maps_path(1);

    assert!(matches!(
        result,
        Err(MapsError::PathTooLong { len: 12, max: 12 })
    ));
    assert!(config.with_max_map_path_len(13).maps_path(1).is_ok());
}
