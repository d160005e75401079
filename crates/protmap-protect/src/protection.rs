// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Protection bitset passed to `mprotect`.

use core::fmt;

use bitflags::bitflags;
use protmap_maps::Permissions;

bitflags! {
    /// Access rights of a page.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Protection: libc::c_int {
        /// `PROT_READ`
        const READ = libc::PROT_READ;
        /// `PROT_WRITE`
        const WRITE = libc::PROT_WRITE;
        /// `PROT_EXEC`
        const EXEC = libc::PROT_EXEC;
    }
}

impl Protection {
    /// `PROT_NONE`
    pub const NONE: Self = Self::empty();

    /// `PROT_READ | PROT_WRITE`
    pub const READ_WRITE: Self = Self::READ.union(Self::WRITE);
}

impl From<Permissions> for Protection {
    fn from(permissions: Permissions) -> Self {
        let mut protection = Self::NONE;
        protection.set(Self::READ, permissions.is_readable());
        protection.set(Self::WRITE, permissions.is_writable());
        protection.set(Self::EXEC, permissions.is_executable());
        protection
    }
}

/// Renders as `rwx` with `-` for missing rights.
impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };

        write!(
            f,
            "{}{}{}",
            flag(self.contains(Self::READ), 'r'),
            flag(self.contains(Self::WRITE), 'w'),
            flag(self.contains(Self::EXEC), 'x')
        )
    }
}
