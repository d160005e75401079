// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use protmap_maps::Permissions;

use crate::protection::Protection;

fn from_code(code: &str) -> Protection {
    Protection::from(Permissions::parse(code).expect("Failed to parse(..)"))
}

#[test]
fn test_from_permissions() {
    assert_eq!(from_code("r-xp"), Protection::READ | Protection::EXEC);
    assert_eq!(from_code("rw-p"), Protection::READ_WRITE);
    assert_eq!(from_code("---p"), Protection::NONE);
    assert_eq!(from_code("rwxs"), Protection::all());
}

#[test]
fn test_bits_match_libc() {
    assert_eq!(Protection::NONE.bits(), libc::PROT_NONE);
    assert_eq!(
        Protection::READ_WRITE.bits(),
        libc::PROT_READ | libc::PROT_WRITE
    );
}

#[test]
fn test_display() {
    assert_eq!(Protection::READ.to_string(), "r--");
    assert_eq!(Protection::READ_WRITE.to_string(), "rw-");
    assert_eq!(Protection::all().to_string(), "rwx");
    assert_eq!(Protection::NONE.to_string(), "---");
}
