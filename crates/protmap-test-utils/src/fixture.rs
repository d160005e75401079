// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Synthetic `/proc` trees.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Two regions with a gap between them. The first is file backed, the
/// second anonymous.
pub const TWO_REGION_MAPS: &str = concat!(
    "1000-2000 r-xp 00000000 08:01 1234 /lib/x\n",
    "3000-4000 rw-p 00000000 00:00 0\n",
);

static NEXT_FIXTURE: AtomicUsize = AtomicUsize::new(0);

/// A temporary directory standing in for `/proc`. Removed on drop.
#[derive(Debug)]
pub struct ProcFixture {
    root: PathBuf,
}

impl ProcFixture {
    /// Creates an empty fixture directory.
    pub fn new() -> Self {
        let id = NEXT_FIXTURE.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!(
            "protmap-fixture-{}-{}",
            std::process::id(),
            id
        ));

        fs::create_dir_all(&root).expect("Failed to create_dir_all(..)");

        Self { root }
    }

    /// Creates a fixture holding a single `<pid>/maps` file.
    pub fn with_maps(pid: u32, contents: &str) -> Self {
        let fixture = Self::new();
        fixture.write_maps(pid, contents);
        fixture
    }

    /// Directory to use as the proc root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `<root>/<pid>/maps` and returns its path.
    pub fn write_maps(&self, pid: u32, contents: &str) -> PathBuf {
        let dir = self.root.join(pid.to_string());
        fs::create_dir_all(&dir).expect("Failed to create_dir_all(..)");

        let path = dir.join("maps");
        fs::write(&path, contents).expect("Failed to write(..)");

        path
    }
}

impl Default for ProcFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProcFixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
