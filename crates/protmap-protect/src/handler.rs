// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Fault recovery handler.
//!
//! Installed with `SA_SIGINFO` for one signal (normally `SIGSEGV`). On a
//! fault it reports the faulting instruction and data address, then grants
//! access back to the faulting page so the interrupted instruction succeeds
//! when it is restarted.
//!
//! The granted protection does not depend on which access faulted: every
//! fault restores [`FaultPolicy::grant`] (read + write by default).
//!
//! # States
//!
//! `Idle` → fault delivered → `Handling` → protection restored → `Idle`.
//! A second fault while `Handling` (the handler itself faulted) resets the
//! signal to its default disposition and returns, so the fault is delivered
//! again and terminates the process.
//!
//! The handler performs no allocation: output is formatted on the stack and
//! written with `write(2)`, and the map lookup of
//! [`ProtectionController::change_protection`] is skipped.
//!
//! Because the lookup is skipped, a fault on an address that is not mapped
//! at all is not told apart from a protection fault. The handler still
//! issues `mprotect`, which fails with `ENOMEM`, and the process exits with
//! `EXIT_FAILURE` instead of being killed by the signal.

use core::ffi::c_void;
use core::fmt::Write as _;
use core::ptr;
use core::sync::atomic::{AtomicI32, AtomicU8, AtomicUsize, Ordering};
use std::io;

use log::debug;

use crate::context::{fault_address, instruction_pointer};
use crate::controller::ProtectionController;
use crate::error::HandlerError;
use crate::page::page_size;
use crate::protection::Protection;
use crate::signal_safe::StackWriter;

type FaultHandler = extern "C" fn(libc::c_int, *mut libc::siginfo_t, *mut c_void);

/// Handler state: waiting for a fault
const STATE_IDLE: u8 = 0;
/// Handler state: a fault is being handled
const STATE_HANDLING: u8 = 1;

static STATE: AtomicU8 = AtomicU8::new(STATE_IDLE);
static FAULTS: AtomicUsize = AtomicUsize::new(0);
static PAGE_SIZE: AtomicUsize = AtomicUsize::new(0);
static GRANT: AtomicI32 = AtomicI32::new(Protection::READ_WRITE.bits());
static GRANT_LEN: AtomicUsize = AtomicUsize::new(core::mem::size_of::<i32>());

/// Observable handler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    /// No fault in progress.
    Idle,
    /// The handler is running.
    Handling,
}

/// What the handler grants back to a faulting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultPolicy {
    /// Protection applied to the faulting page.
    pub grant: Protection,
    /// Bytes, starting at the faulting address, the protection must cover.
    pub length: usize,
}

impl Default for FaultPolicy {
    fn default() -> Self {
        Self {
            grant: Protection::READ_WRITE,
            length: core::mem::size_of::<i32>(),
        }
    }
}

/// Installs the fault handler for `signal` with `policy`.
///
/// Installing again replaces the policy.
pub fn install(signal: libc::c_int, policy: FaultPolicy) -> Result<(), HandlerError> {
    PAGE_SIZE.store(page_size(), Ordering::Relaxed);
    GRANT.store(policy.grant.bits(), Ordering::Relaxed);
    GRANT_LEN.store(policy.length, Ordering::Relaxed);
    STATE.store(STATE_IDLE, Ordering::Release);

    let mut action: libc::sigaction = unsafe { core::mem::zeroed() };
    action.sa_sigaction = on_fault as FaultHandler as libc::sighandler_t;
    action.sa_flags = libc::SA_SIGINFO;
    unsafe { libc::sigemptyset(&mut action.sa_mask) };

    let failed = unsafe { libc::sigaction(signal, &action, ptr::null_mut()) } == -1;

    if failed {
        return Err(HandlerError::Install {
            signal,
            source: io::Error::last_os_error(),
        });
    }

    debug!("fault handler installed for signal {signal}, granting {}", policy.grant);

    Ok(())
}

/// Restores the default disposition of `signal`.
pub fn uninstall(signal: libc::c_int) -> Result<(), HandlerError> {
    let mut action: libc::sigaction = unsafe { core::mem::zeroed() };
    action.sa_sigaction = libc::SIG_DFL;
    unsafe { libc::sigemptyset(&mut action.sa_mask) };

    let failed = unsafe { libc::sigaction(signal, &action, ptr::null_mut()) } == -1;

    if failed {
        return Err(HandlerError::Uninstall {
            signal,
            source: io::Error::last_os_error(),
        });
    }

    debug!("fault handler removed for signal {signal}");

    Ok(())
}

/// Number of faults handled since the process started.
pub fn fault_count() -> usize {
    FAULTS.load(Ordering::Acquire)
}

/// Current handler state.
pub fn handler_state() -> HandlerState {
    match STATE.load(Ordering::Acquire) {
        STATE_HANDLING => HandlerState::Handling,
        _ => HandlerState::Idle,
    }
}

extern "C" fn on_fault(signal: libc::c_int, info: *mut libc::siginfo_t, context: *mut c_void) {
    if STATE
        .compare_exchange(
            STATE_IDLE,
            STATE_HANDLING,
            Ordering::AcqRel,
            Ordering::Acquire,
        )
        .is_err()
    {
        unsafe { libc::signal(signal, libc::SIG_DFL) };
        return;
    }

    FAULTS.fetch_add(1, Ordering::AcqRel);

    let address = unsafe { fault_address(info) };
    let instruction = unsafe { instruction_pointer(context) };

    report_fault(instruction, address);

    ProtectionController::restore_in_handler(
        address,
        GRANT_LEN.load(Ordering::Relaxed),
        Protection::from_bits_truncate(GRANT.load(Ordering::Relaxed)),
        PAGE_SIZE.load(Ordering::Relaxed),
    );

    STATE.store(STATE_IDLE, Ordering::Release);
}

fn report_fault(instruction: usize, address: usize) {
    let mut out = StackWriter::new();

    let _ = writeln!(out, "--- Segmentation Fault ---");
    let _ = writeln!(out, " inst: {instruction:#x}");
    let _ = writeln!(out, " addr: {address:#x}");
    let _ = writeln!(out, "--------------------------");
    let _ = writeln!(out, "Okay, giving write permissions back...");

    out.flush_to(libc::STDOUT_FILENO);
}
