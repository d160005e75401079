// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! One row of a process memory map.

use core::fmt;
use std::path::{Path, PathBuf};

use crate::permissions::Permissions;

/// A contiguous virtual address range with its access code and backing.
///
/// Records are plain values: they own their file path and outlive the
/// stream that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegionRecord {
    /// First address of the region.
    pub start: usize,
    /// One past the last address of the region.
    pub end: usize,
    /// Access code.
    pub permissions: Permissions,
    /// Offset into the backing file. Meaningful only with a file path.
    pub offset: u64,
    /// Major number of the backing device, 0 when anonymous.
    pub dev_major: u32,
    /// Minor number of the backing device, 0 when anonymous.
    pub dev_minor: u32,
    /// Inode of the backing file, 0 when anonymous.
    pub inode: u64,
    /// Backing file or pseudo-path (`[heap]`, `[stack]`), byte for byte.
    pub file_path: Option<PathBuf>,
}

impl MemoryRegionRecord {
    /// Returns true if `address` lies in the half-open range `[start, end)`.
    pub fn contains(&self, address: usize) -> bool {
        address >= self.start && address < self.end
    }

    /// Size of the region in bytes.
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the region is backed by a file on a device.
    pub fn is_file_backed(&self) -> bool {
        self.inode != 0
    }

    /// The file path, or an empty path for anonymous regions.
    pub fn file_path_or_empty(&self) -> &Path {
        self.file_path.as_deref().unwrap_or(Path::new(""))
    }

    /// Serializes the mandatory fields in map-line form.
    pub fn mandatory_fields(&self) -> String {
        format!(
            "{:x}-{:x} {} {:08x} {:02x}:{:02x} {}",
            self.start,
            self.end,
            self.permissions,
            self.offset,
            self.dev_major,
            self.dev_minor,
            self.inode
        )
    }
}

/// Three-line summary: range, permissions and file path.
impl fmt::Display for MemoryRegionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Range: {:#x} → {:#x}", self.start, self.end)?;
        writeln!(f, "Perms: {}", self.permissions)?;
        write!(f, "Fpath: {}", self.file_path_or_empty().display())
    }
}
