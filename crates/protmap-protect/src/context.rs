// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Reads the fault details the kernel hands to a `SA_SIGINFO` handler.

use core::ffi::c_void;

/// Faulting data address.
///
/// # Safety
/// `info` must be the `siginfo_t` passed to the running handler.
pub(crate) unsafe fn fault_address(info: *const libc::siginfo_t) -> usize {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        unsafe { (*info).si_addr() as usize }
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    {
        unsafe { (*info).si_addr as usize }
    }
}

/// Instruction pointer at the time of the fault, or 0 where the machine
/// context layout is not known.
///
/// # Safety
/// `context` must be the `ucontext_t` passed to the running handler.
pub(crate) unsafe fn instruction_pointer(context: *const c_void) -> usize {
    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    {
        let context = context.cast::<libc::ucontext_t>();
        unsafe { (*context).uc_mcontext.gregs[libc::REG_RIP as usize] as usize }
    }

    #[cfg(all(target_os = "linux", target_arch = "x86"))]
    {
        let context = context.cast::<libc::ucontext_t>();
        unsafe { (*context).uc_mcontext.gregs[libc::REG_EIP as usize] as usize }
    }

    #[cfg(all(target_os = "linux", target_arch = "aarch64"))]
    {
        let context = context.cast::<libc::ucontext_t>();
        unsafe { (*context).uc_mcontext.pc as usize }
    }

    #[cfg(not(all(
        target_os = "linux",
        any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")
    )))]
    {
        let _ = context;
        0
    }
}
