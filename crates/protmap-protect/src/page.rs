// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Page-aligned spans.

use log::warn;

use crate::error::ProtectError;
use crate::protection::Protection;

/// Page size assumed when `sysconf` cannot report one.
pub const FALLBACK_PAGE_SIZE: usize = 4096;

/// Returns the system page size.
///
/// Falls back to [`FALLBACK_PAGE_SIZE`], with a warning, when
/// `sysconf(_SC_PAGESIZE)` fails or reports something that is not a page
/// size.
pub fn page_size() -> usize {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };

    page_size_from(size)
}

pub(crate) fn page_size_from(raw: libc::c_long) -> usize {
    match usize::try_from(raw) {
        Ok(size) if size.is_power_of_two() => size,
        _ => {
            warn!("sysconf(_SC_PAGESIZE) returned {raw}, assuming {FALLBACK_PAGE_SIZE}");
            FALLBACK_PAGE_SIZE
        }
    }
}

/// A request to change the protection of `[address, address + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProtectionRequest {
    /// First byte to protect.
    pub address: usize,
    /// Number of bytes to protect.
    pub length: usize,
    /// Rights to apply.
    pub protection: Protection,
}

/// Page-aligned span handed to `mprotect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    /// Page-aligned start.
    pub start: usize,
    /// Bytes from `start` to the end of the request.
    pub len: usize,
}

impl PageSpan {
    /// One past the last byte of the span.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Last byte of the span (`start` for an empty span).
    pub fn last(&self) -> usize {
        self.end().saturating_sub(1).max(self.start)
    }
}

impl PageProtectionRequest {
    /// Creates a request.
    pub fn new(address: usize, length: usize, protection: Protection) -> Self {
        Self {
            address,
            length,
            protection,
        }
    }

    /// Aligns the request down to `page_size`.
    ///
    /// The span starts at the page holding `address` and runs to
    /// `address + length`; `mprotect` rounds its end up to a page boundary.
    pub fn span(&self, page_size: usize) -> Result<PageSpan, ProtectError> {
        if page_size == 0 {
            return Err(ProtectError::InvalidPageSize);
        }

        let offset = self.address % page_size;
        let start = self.address - offset;

        let len = offset
            .checked_add(self.length)
            .filter(|len| start.checked_add(*len).is_some())
            .ok_or(ProtectError::Overflow {
                address: self.address,
                length: self.length,
            })?;

        Ok(PageSpan { start, len })
    }
}
