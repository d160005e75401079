// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! RegionLookup - find the region containing an address.
//!
//! Resource and parse errors stop here: they are reported on standard error
//! and the lookup answers "not found".

use std::io::{self, Write};

use log::debug;

use crate::config::MapsConfig;
use crate::error::report;
use crate::permissions::Permissions;
use crate::record::MemoryRegionRecord;
use crate::source::MapSource;

/// Divider printed around lookup diagnostics.
pub const DIVIDER: &str =
    "********************************************************************************";

/// Scans map descriptions for the region containing an address.
///
/// Every lookup prints the full map, then the matched region, to `out`.
#[derive(Debug)]
pub struct RegionLookup<W = io::Stdout> {
    config: MapsConfig,
    out: W,
}

impl RegionLookup<io::Stdout> {
    /// Creates a lookup that prints to standard output.
    pub fn new(config: MapsConfig) -> Self {
        Self::with_output(config, io::stdout())
    }
}

impl<W: Write> RegionLookup<W> {
    /// Creates a lookup that prints to `out`.
    pub fn with_output(config: MapsConfig, out: W) -> Self {
        Self { config, out }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MapsConfig {
        &self.config
    }

    /// Returns the diagnostic output.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Returns the diagnostic output for writing.
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consumes the lookup, returning the diagnostic output.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Finds the region of process `pid` whose range contains `address`.
    ///
    /// First match in map order wins. Returns `None` when no region covers
    /// the address or the map cannot be read.
    pub fn find(&mut self, pid: u32, address: usize) -> Option<MemoryRegionRecord> {
        match MapSource::open(pid, &self.config) {
            Ok(source) => self.find_in(source, address),
            Err(error) => {
                report(&error);
                None
            }
        }
    }

    /// Same as [`Self::find`] over an already open source. The source is
    /// closed before returning.
    pub fn find_in(&mut self, mut source: MapSource, address: usize) -> Option<MemoryRegionRecord> {
        let found = scan(&mut source, address);

        if self.config.dump_on_lookup {
            self.dump(&mut source);
        }

        match &found {
            Some(record) => self.print_found(address, record),
            None => debug!("no region of {} contains {address:#x}", source.path().display()),
        }

        if let Err(error) = source.close() {
            report(&error);
        }

        found
    }

    /// Permissions of the calling process at `address`.
    pub fn permissions_at(&mut self, address: usize) -> Option<Permissions> {
        self.find(std::process::id(), address)
            .map(|record| record.permissions)
    }

    fn dump(&mut self, source: &mut MapSource) {
        let _ = writeln!(self.out, "{DIVIDER}");

        if let Err(error) = source.dump_remaining(&mut self.out) {
            report(&error);
        }
    }

    fn print_found(&mut self, address: usize, record: &MemoryRegionRecord) {
        let _ = writeln!(self.out, "{DIVIDER}");
        let _ = writeln!(self.out, "Found: {address:#x}");
        let _ = writeln!(self.out, "{record}");
        let _ = writeln!(self.out, "{DIVIDER}");
        let _ = self.out.flush();
    }
}

fn scan(source: &mut MapSource, address: usize) -> Option<MemoryRegionRecord> {
    loop {
        match source.parse_next() {
            Ok(Some(record)) if record.contains(address) => return Some(record),
            Ok(Some(_)) => continue,
            Ok(None) => return None,
            Err(error) => {
                report(&error);
                return None;
            }
        }
    }
}

