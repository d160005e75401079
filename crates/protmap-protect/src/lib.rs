// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Page protection changes driven by the process memory map, with SIGSEGV
//! recovery.
//!
//! # Components
//!
//! - [`ProtectionController`]: looks up the region containing an address,
//!   applies `mprotect` to the page-aligned span covering
//!   `[address, address + length)`, then reports the resulting permissions.
//! - [`handler`]: a `SA_SIGINFO` fault handler that reports the faulting
//!   instruction and data address, then grants write access back to the
//!   faulting page.
//!
//! # Failure policy
//!
//! A region that cannot be found aborts the change without touching the
//! page. A failing `mprotect` means the process' view of its own memory is
//! inconsistent: the error is reported and the process exits with
//! `EXIT_FAILURE`. Use [`ProtectionController::try_change_protection`] to
//! receive the error instead.
//!
//! # Example
//!
//! ```rust,no_run
//! use protmap_maps::MapsConfig;
//! use protmap_protect::{Protection, ProtectionController, handler};
//!
//! handler::install(libc::SIGSEGV, handler::FaultPolicy::default())?;
//!
//! let mut controller = ProtectionController::new(MapsConfig::default());
//! let page = vec![0u8; controller.page_size() * 2];
//! let address = page.as_ptr() as usize;
//!
//! controller.change_protection(address, 1, Protection::READ)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod context;
mod controller;
mod error;
mod page;
mod protection;
mod signal_safe;

pub mod handler;

pub use controller::{ProtectionChange, ProtectionController};
pub use error::{HandlerError, ProtectError};
pub use page::{FALLBACK_PAGE_SIZE, PageProtectionRequest, PageSpan, page_size};
pub use protection::Protection;
