// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Shared helpers for protmap-protect integration tests.

#![allow(dead_code)]

use core::ptr;

use protmap_protect::page_size;

/// One anonymous, private, read/write page. Unmapped on drop.
#[derive(Debug)]
pub struct TestPage {
    ptr: *mut u8,
    len: usize,
}

impl TestPage {
    pub fn new() -> Self {
        Self::with_pages(1)
    }

    pub fn with_pages(pages: usize) -> Self {
        let len = page_size() * pages;
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        assert_ne!(ptr, libc::MAP_FAILED, "mmap failed");

        Self {
            ptr: ptr.cast(),
            len,
        }
    }

    pub fn address(&self) -> usize {
        self.ptr as usize
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn as_int_ptr(&self) -> *mut i32 {
        self.ptr.cast()
    }
}

impl Drop for TestPage {
    fn drop(&mut self) {
        unsafe { libc::munmap(self.ptr.cast(), self.len) };
    }
}

/// Start of a page-sized range that is not mapped right now.
pub fn unmapped_address() -> usize {
    let page = TestPage::new();
    page.address()
}

/// True if the child was killed by SIGSEGV.
pub fn killed_by_segv(status: libc::c_int) -> bool {
    libc::WIFSIGNALED(status) && libc::WTERMSIG(status) == libc::SIGSEGV
}

/// True if the child exited normally with 0.
pub fn exited_cleanly(status: libc::c_int) -> bool {
    libc::WIFEXITED(status) && libc::WEXITSTATUS(status) == 0
}
