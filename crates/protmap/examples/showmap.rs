// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Protects a heap page read-only, writes to it, and lets the fault handler
//! give write access back.
//!
//! ```text
//! cargo run -p protmap --example showmap
//! ```

use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::process::ExitCode;

use protmap::maps::MapsConfig;
use protmap::protect::handler::{self, FaultPolicy};
use protmap::protect::{Protection, ProtectionController, page_size};

fn main() -> ExitCode {
    let page_size = page_size();

    if let Err(error) = handler::install(libc::SIGSEGV, FaultPolicy::default()) {
        eprintln!("Error: {error}");
        return ExitCode::FAILURE;
    }

    let Ok(layout) = Layout::from_size_align(page_size, page_size) else {
        eprintln!("Error: Couldn't build page layout!");
        return ExitCode::FAILURE;
    };

    let page = unsafe { alloc_zeroed(layout) };
    if page.is_null() {
        eprintln!("Error: Couldn't allocate aligned page!");
        return ExitCode::FAILURE;
    }

    let mut controller = ProtectionController::new(MapsConfig::default());
    if controller
        .change_protection(page as usize, page_size, Protection::READ)
        .is_err()
    {
        unsafe { dealloc(page, layout) };
        return ExitCode::FAILURE;
    }

    let value = page.cast::<i32>();
    unsafe { value.write_volatile(5) };

    println!("p = {}", unsafe { value.read_volatile() });
    println!("faults handled: {}", handler::fault_count());

    unsafe { dealloc(page, layout) };
    ExitCode::SUCCESS
}
