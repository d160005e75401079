// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # protmap
//!
//! Reads a process memory map, finds the region holding an address and
//! changes the protection of the pages behind it, recovering from the
//! resulting access violations with a `SIGSEGV` handler.
//!
//! - [`maps`]: `/proc/<pid>/maps` parsing and region lookup.
//! - [`protect`]: map-checked `mprotect` and the fault recovery handler.
//!
//! # Example
//!
//! ```rust,no_run
//! use protmap::maps::MapsConfig;
//! use protmap::protect::{Protection, ProtectionController, handler};
//!
//! handler::install(libc::SIGSEGV, handler::FaultPolicy::default())?;
//!
//! let mut controller = ProtectionController::new(MapsConfig::default());
//! let buffer = vec![0i32; 4096];
//! let address = buffer.as_ptr() as usize;
//!
//! controller.change_protection(address, 4, Protection::READ)?;
//!
//! // Faults, the handler grants write access back, the write goes through.
//! unsafe { (address as *mut i32).write_volatile(5) };
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use protmap_maps as maps;
pub use protmap_protect as protect;
