// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt::Write;

use crate::signal_safe::StackWriter;

#[test]
fn test_formats_into_buffer() {
    let mut writer = StackWriter::new();

    write!(writer, " addr: {:#x}", 0x1000usize).expect("Failed to write!(..)");

    assert_eq!(writer.as_bytes(), b" addr: 0x1000");
}

#[test]
fn test_truncates_past_capacity() {
    let mut writer = StackWriter::new();
    let long = "x".repeat(1000);

    writer.write_str(&long).expect("Failed to write_str(..)");
    writer.write_str("tail").expect("Failed to write_str(..)");

    assert_eq!(writer.as_bytes().len(), 256);
    assert!(writer.as_bytes().iter().all(|&b| b == b'x'));
}
