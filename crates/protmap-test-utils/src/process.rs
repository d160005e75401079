// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Subprocess and seccomp helpers.

use std::process::{Command, Output};

fn subprocess_command(test_name: &str) -> Command {
    let exe = std::env::current_exe().expect("Failed to current_exe()");
    let mut command = Command::new(exe);
    command.args([
        "--exact",
        test_name,
        "--ignored",
        "--test-threads=1",
        "--nocapture",
    ]);
    command
}

/// Runs an ignored test as a subprocess and returns its exit code.
///
/// Returns `None` when the child was killed by a signal.
pub fn run_test_as_subprocess(test_name: &str) -> Option<i32> {
    let status = subprocess_command(test_name)
        .status()
        .expect("Failed to run subprocess");

    status.code()
}

/// Like [`run_test_as_subprocess`], but captures the child's stdout and
/// stderr.
pub fn run_test_as_subprocess_with_output(test_name: &str) -> Output {
    subprocess_command(test_name)
        .output()
        .expect("Failed to run subprocess")
}

/// Forks, runs `child` in the child process and returns the raw wait status.
///
/// The child exits with 0 if `child` returns.
pub fn fork_and_wait(child: impl FnOnce()) -> libc::c_int {
    match unsafe { libc::fork() } {
        -1 => panic!("fork failed"),
        0 => {
            child();
            unsafe { libc::_exit(0) };
        }
        child_pid => {
            let mut status: libc::c_int = 0;
            unsafe { libc::waitpid(child_pid, &mut status, 0) };
            status
        }
    }
}

/// Check if seccomp is available by forking a child process that attempts to load a filter.
/// Returns true if seccomp works, false if running under QEMU or seccomp is unavailable.
#[cfg(target_os = "linux")]
pub fn is_seccomp_available() -> bool {
    use libseccomp::{ScmpAction, ScmpFilterContext};

    let status = fork_and_wait(|| {
        let result = ScmpFilterContext::new(ScmpAction::Allow).and_then(|filter| filter.load());
        unsafe { libc::_exit(if result.is_ok() { 0 } else { 1 }) };
    });

    libc::WIFEXITED(status) && libc::WEXITSTATUS(status) == 0
}

#[cfg(target_os = "linux")]
fn block_syscall(name: &str) {
    use libseccomp::{ScmpAction, ScmpFilterContext, ScmpSyscall};

    let mut filter = ScmpFilterContext::new(ScmpAction::Allow).expect("Failed to create filter");
    filter
        .add_rule(
            ScmpAction::Errno(libc::EPERM),
            ScmpSyscall::from_name(name).expect("Failed to from_name(..)"),
        )
        .expect("Failed to add rule");
    filter.load().expect("Failed to load seccomp filter");
}

/// Makes every subsequent `mprotect` in this process fail with `EPERM`.
#[cfg(target_os = "linux")]
pub fn block_mprotect() {
    block_syscall("mprotect");
}
