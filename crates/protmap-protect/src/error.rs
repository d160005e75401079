// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for protmap-protect.

use std::io;

use thiserror::Error;

use crate::protection::Protection;

/// Errors from a protection change.
#[derive(Debug, Error)]
pub enum ProtectError {
    /// The page size used for alignment is zero.
    #[error("invalid page size 0")]
    InvalidPageSize,

    /// The page-aligned span does not fit in the address space.
    #[error("span {address:#x} + {length} overflows the address space")]
    Overflow {
        /// Requested address.
        address: usize,
        /// Requested length.
        length: usize,
    },

    /// No region of the memory map covers the address.
    #[error("Can't find old permissions for {address:#x}")]
    RegionNotFound {
        /// Requested address.
        address: usize,
    },

    /// The `mprotect` call failed.
    #[error("mprotect({address:#x}, {length}, {protection}) failed. Reason: {source}")]
    Mprotect {
        /// Page-aligned start of the span.
        address: usize,
        /// Length of the span in bytes.
        length: usize,
        /// Requested protection.
        protection: Protection,
        /// Underlying OS error.
        source: io::Error,
    },
}

/// Errors from installing or removing the fault handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// `sigaction` refused the handler.
    #[error("sigaction({signal}) failed: {source}")]
    Install {
        /// Signal number.
        signal: libc::c_int,
        /// Underlying OS error.
        source: io::Error,
    },

    /// `sigaction` refused to restore the default disposition.
    #[error("sigaction({signal}, SIG_DFL) failed: {source}")]
    Uninstall {
        /// Signal number.
        signal: libc::c_int,
        /// Underlying OS error.
        source: io::Error,
    },
}
