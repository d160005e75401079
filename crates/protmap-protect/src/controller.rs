// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ProtectionController - map-checked `mprotect`.
//!
//! A change is only issued after the memory map confirms the address is
//! mapped. `mprotect` failures are fatal: the process exits.

use std::io::{self, Write};

use log::debug;
use protmap_maps::{MapsConfig, Permissions, RegionLookup};

use crate::error::ProtectError;
use crate::page::{PageProtectionRequest, PageSpan, page_size};
use crate::protection::Protection;
use crate::signal_safe;

/// Outcome of a successful protection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectionChange {
    /// Span passed to `mprotect`.
    pub span: PageSpan,
    /// Permissions of the region before the change.
    pub previous: Permissions,
    /// Permissions reported by the map after the change.
    pub current: Option<Permissions>,
}

/// Changes page protections of the calling process.
///
/// Every change looks the address up in the memory map of the calling
/// process first, and again afterwards for verification. The pid is read at
/// each lookup, so a controller carried across `fork` follows the child. Both lookups print their diagnostics
/// to the controller's output.
#[derive(Debug)]
pub struct ProtectionController<W = io::Stdout> {
    lookup: RegionLookup<W>,
    page_size: usize,
}

impl ProtectionController<io::Stdout> {
    /// Creates a controller printing to standard output.
    pub fn new(config: MapsConfig) -> Self {
        Self::with_output(config, io::stdout())
    }

    /// Applies `protection` from inside a signal handler.
    ///
    /// Skips the map lookups, which allocate. Output goes through `write(2)`
    /// from a stack buffer. Exits the process with `EXIT_FAILURE` if the span
    /// is invalid or `mprotect` fails.
    pub fn restore_in_handler(
        address: usize,
        length: usize,
        protection: Protection,
        page_size: usize,
    ) {
        let span = match PageProtectionRequest::new(address, length, protection).span(page_size) {
            Ok(span) => span,
            Err(error) => {
                signal_safe::report_error(&error);
                exit_failure();
            }
        };

        if let Err(ProtectError::Mprotect { source, .. }) = mprotect(span, protection) {
            signal_safe::report_mprotect_failure(span, protection, source.raw_os_error());
            exit_failure();
        }

        signal_safe::report_applied(span, protection);
    }
}

impl<W: Write> ProtectionController<W> {
    /// Creates a controller printing to `out`.
    pub fn with_output(config: MapsConfig, out: W) -> Self {
        Self {
            lookup: RegionLookup::with_output(config, out),
            page_size: page_size(),
        }
    }

    /// Overrides the page size used for alignment.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Page size used for alignment.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The lookup used before and after each change.
    pub fn lookup_mut(&mut self) -> &mut RegionLookup<W> {
        &mut self.lookup
    }

    /// Consumes the controller, returning its output.
    pub fn into_output(self) -> W {
        self.lookup.into_output()
    }

    /// Applies `protection` to the pages covering `[address, address + length)`.
    ///
    /// Returns an error, without touching any page, when the address is not
    /// mapped. Exits the process with `EXIT_FAILURE` if `mprotect` fails.
    pub fn change_protection(
        &mut self,
        address: usize,
        length: usize,
        protection: Protection,
    ) -> Result<ProtectionChange, ProtectError> {
        match self.try_change_protection(address, length, protection) {
            Ok(change) => Ok(change),
            Err(error @ ProtectError::Mprotect { .. }) => fatal(&error),
            Err(error) => {
                eprintln!("protect: {error}. Aborting...");
                Err(error)
            }
        }
    }

    /// Same as [`Self::change_protection`], but returns `mprotect` failures
    /// instead of exiting.
    pub fn try_change_protection(
        &mut self,
        address: usize,
        length: usize,
        protection: Protection,
    ) -> Result<ProtectionChange, ProtectError> {
        let span = PageProtectionRequest::new(address, length, protection).span(self.page_size)?;

        let previous = self
            .lookup
            .find(std::process::id(), address)
            .ok_or(ProtectError::RegionNotFound { address })?
            .permissions;

        debug!(
            "{address:#x} is {previous}, applying {protection} to {:#x}..{:#x}",
            span.start,
            span.end()
        );

        mprotect(span, protection)?;

        let out = self.lookup.output_mut();
        let _ = writeln!(
            out,
            "Applied \"{protection}\" to: {:#x} → {:#x}",
            span.start,
            span.last()
        );
        let _ = writeln!(out, "Checking: {address:#x}");

        let current = self
            .lookup
            .find(std::process::id(), address)
            .map(|record| record.permissions);

        Ok(ProtectionChange {
            span,
            previous,
            current,
        })
    }
}

fn mprotect(span: PageSpan, protection: Protection) -> Result<(), ProtectError> {
    let failed =
        unsafe { libc::mprotect(span.start as *mut libc::c_void, span.len, protection.bits()) } != 0;

    if failed {
        return Err(ProtectError::Mprotect {
            address: span.start,
            length: span.len,
            protection,
            source: io::Error::last_os_error(),
        });
    }

    Ok(())
}

fn fatal(error: &ProtectError) -> ! {
    eprintln!("Error: {error}");
    let _ = io::stdout().flush();
    exit_failure()
}

fn exit_failure() -> ! {
    // _exit skips atexit handlers and destructors that may touch the pages.
    unsafe { libc::_exit(libc::EXIT_FAILURE) }
}
