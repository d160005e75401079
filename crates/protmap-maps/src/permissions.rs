// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Four-character access code of a mapping.

use core::fmt;

/// Access code of a region, e.g. `r-xp`.
///
/// Fixed width, one position per attribute: `r`/`-`, `w`/`-`, `x`/`-`,
/// then `s` (shared) or `p` (private).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permissions([u8; 4]);

impl Permissions {
    /// Width of the code in bytes.
    pub const LEN: usize = 4;

    /// Parses a code, rejecting anything outside the `{r,-}{w,-}{x,-}{s,p}`
    /// alphabet or of the wrong width.
    pub fn parse(code: &str) -> Option<Self> {
        let &[read, write, execute, sharing] = code.as_bytes() else {
            return None;
        };

        let valid = matches!(read, b'r' | b'-')
            && matches!(write, b'w' | b'-')
            && matches!(execute, b'x' | b'-')
            && matches!(sharing, b's' | b'p');

        valid.then_some(Self([read, write, execute, sharing]))
    }

    /// Returns true if the region is readable.
    pub fn is_readable(&self) -> bool {
        self.0[0] == b'r'
    }

    /// Returns true if the region is writable.
    pub fn is_writable(&self) -> bool {
        self.0[1] == b'w'
    }

    /// Returns true if the region is executable.
    pub fn is_executable(&self) -> bool {
        self.0[2] == b'x'
    }

    /// Returns true if the mapping is shared, false if private (copy-on-write).
    pub fn is_shared(&self) -> bool {
        self.0[3] == b's'
    }

    /// Returns the code as text.
    pub fn as_str(&self) -> &str {
        // Only ASCII bytes pass parse().
        core::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
