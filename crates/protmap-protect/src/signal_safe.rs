// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Output usable from a signal handler.
//!
//! Formatting goes into a fixed stack buffer and leaves through `write(2)`.
//! No allocation, no locks.

use core::fmt::{self, Write as _};

use crate::error::ProtectError;
use crate::page::PageSpan;
use crate::protection::Protection;

const CAPACITY: usize = 256;

/// Fixed-capacity line buffer. Text past the capacity is dropped.
pub(crate) struct StackWriter {
    buf: [u8; CAPACITY],
    len: usize,
}

impl StackWriter {
    pub(crate) const fn new() -> Self {
        Self {
            buf: [0; CAPACITY],
            len: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Writes the buffer to `fd` and empties it.
    pub(crate) fn flush_to(&mut self, fd: libc::c_int) {
        write_all(fd, &self.buf[..self.len]);
        self.len = 0;
    }
}

impl fmt::Write for StackWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let available = CAPACITY - self.len;
        let take = s.len().min(available);

        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;

        Ok(())
    }
}

fn write_all(fd: libc::c_int, mut bytes: &[u8]) {
    while !bytes.is_empty() {
        let written = unsafe { libc::write(fd, bytes.as_ptr().cast(), bytes.len()) };

        if written <= 0 {
            return;
        }

        bytes = &bytes[written as usize..];
    }
}

/// `Applied "<prot>" to: <start> → <last>` on standard output.
pub(crate) fn report_applied(span: PageSpan, protection: Protection) {
    let mut line = StackWriter::new();
    let _ = writeln!(
        line,
        "Applied \"{protection}\" to: {:#x} → {:#x}",
        span.start,
        span.last()
    );
    line.flush_to(libc::STDOUT_FILENO);
}

/// One-line `mprotect` failure on standard error.
pub(crate) fn report_mprotect_failure(span: PageSpan, protection: Protection, errno: Option<i32>) {
    let mut line = StackWriter::new();
    let _ = writeln!(
        line,
        "Error: mprotect({:#x}, {}, {protection}) failed. errno: {}",
        span.start,
        span.len,
        errno.unwrap_or(0)
    );
    line.flush_to(libc::STDERR_FILENO);
}

/// One-line diagnostic on standard error. Only for variants whose
/// `Display` does not allocate.
pub(crate) fn report_error(error: &ProtectError) {
    let mut line = StackWriter::new();
    let _ = writeln!(line, "Error: {error}");
    line.flush_to(libc::STDERR_FILENO);
}
