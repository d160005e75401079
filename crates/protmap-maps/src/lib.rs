// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Streaming access to a process memory map (`/proc/<pid>/maps`).
//!
//! Each line of the map describes one virtual memory region:
//!
//! ```text
//! 7f3a1c000000-7f3a1c021000 r-xp 00000000 08:01 1234   /usr/lib/libc.so.6
//! 7ffd2a1f3000-7ffd2a214000 rw-p 00000000 00:00 0      [stack]
//! ```
//!
//! # Components
//!
//! - [`MapSource`]: an owned, open map stream. Produces one
//!   [`MemoryRegionRecord`] per call to [`MapSource::parse_next`] and can dump
//!   the whole map without disturbing its read position.
//! - [`RegionLookup`]: scans a [`MapSource`] for the region containing an
//!   address, printing a diagnostic dump of the map on the way.
//!
//! Every scan owns its own stream and line buffer. Two lookups never share
//! parse state, so re-entrant and concurrent scans are independent.
//!
//! # Parse policy
//!
//! The mandatory fields (range, permissions, offset, device, inode) must all
//! match, otherwise the line yields no record and scanning stops. The
//! trailing file path is optional: when it is missing, too long or not
//! terminated by a line break, the record is still produced with no path.
//!
//! # Example
//!
//! ```rust,no_run
//! use protmap_maps::{MapsConfig, RegionLookup};
//!
//! let value = 42u64;
//! let address = &value as *const u64 as usize;
//!
//! let mut lookup = RegionLookup::new(MapsConfig::default());
//! if let Some(record) = lookup.find(std::process::id(), address) {
//!     assert!(record.permissions.is_readable());
//! }
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod config;
mod error;
mod lookup;
mod parser;
mod permissions;
mod record;
mod source;

pub use config::{DEFAULT_MAX_FILE_PATH_LEN, DEFAULT_MAX_MAP_PATH_LEN, MapsConfig};
pub use error::MapsError;
pub use lookup::{DIVIDER, RegionLookup};
pub use parser::{parse_line, parse_line_bytes};
pub use permissions::Permissions;
pub use record::MemoryRegionRecord;
pub use source::MapSource;
