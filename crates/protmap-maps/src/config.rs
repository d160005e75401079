// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Lookup configuration.

use std::path::{Path, PathBuf};

use crate::error::MapsError;

/// Default bound on the constructed `<root>/<pid>/maps` path, in bytes.
pub const DEFAULT_MAX_MAP_PATH_LEN: usize = 1024;

/// Default bound on the optional trailing file path, in bytes.
pub const DEFAULT_MAX_FILE_PATH_LEN: usize = DEFAULT_MAX_MAP_PATH_LEN - 1;

/// Where map descriptions are found and how they are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapsConfig {
    /// Directory holding one `<pid>/maps` entry per process.
    pub proc_root: PathBuf,
    /// Paths of this many bytes or more are rejected.
    pub max_map_path_len: usize,
    /// Trailing file paths longer than this are dropped from the record.
    pub max_file_path_len: usize,
    /// Whether [`crate::RegionLookup`] dumps the whole map on every lookup.
    pub dump_on_lookup: bool,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            max_map_path_len: DEFAULT_MAX_MAP_PATH_LEN,
            max_file_path_len: DEFAULT_MAX_FILE_PATH_LEN,
            dump_on_lookup: true,
        }
    }
}

impl MapsConfig {
    /// Replaces the directory that holds per-process map descriptions.
    pub fn with_proc_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.proc_root = root.into();
        self
    }

    /// Replaces the bound on the constructed map path.
    pub fn with_max_map_path_len(mut self, max: usize) -> Self {
        self.max_map_path_len = max;
        self
    }

    /// Replaces the bound on the optional trailing file path.
    pub fn with_max_file_path_len(mut self, max: usize) -> Self {
        self.max_file_path_len = max;
        self
    }

    /// Enables or disables the diagnostic dump performed by lookups.
    pub fn with_dump_on_lookup(mut self, dump: bool) -> Self {
        self.dump_on_lookup = dump;
        self
    }

    /// Returns the directory holding per-process map descriptions.
    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    /// Builds the map path for `pid`, enforcing `max_map_path_len`.
    pub fn maps_path(&self, pid: u32) -> Result<PathBuf, MapsError> {
        let path = self.proc_root.join(pid.to_string()).join("maps");
        let len = path.as_os_str().len();

        if len >= self.max_map_path_len {
            return Err(MapsError::PathTooLong {
                len,
                max: self.max_map_path_len,
            });
        }

        Ok(path)
    }
}
