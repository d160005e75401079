// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for protmap crates.
//!
//! - [`ProcFixture`]: a throwaway directory laid out like `/proc`, holding
//!   synthetic `<pid>/maps` files.
//! - [`run_test_as_subprocess`]: re-runs an `#[ignore]`d test in a child
//!   process, for tests that install signal handlers, load seccomp filters
//!   or are expected to terminate the process.
//! - [`block_mprotect`]: loads a seccomp filter making `mprotect` fail.
//!
//! ## License
//!
//! GPL-3.0-only

mod fixture;
#[cfg(unix)]
mod process;

pub use fixture::{ProcFixture, TWO_REGION_MAPS};
#[cfg(unix)]
pub use process::{fork_and_wait, run_test_as_subprocess, run_test_as_subprocess_with_output};
#[cfg(target_os = "linux")]
pub use process::{block_mprotect, is_seccomp_available};
