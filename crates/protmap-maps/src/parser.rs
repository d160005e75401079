// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Map line parser.
//!
//! Mandatory fields are all-or-nothing. The trailing file path degrades to
//! `None` instead of failing the line.

use std::path::PathBuf;

use crate::permissions::Permissions;
use crate::record::MemoryRegionRecord;

const FIELD_SEPARATORS: [u8; 2] = [b' ', b'\t'];

/// Parses one map line, with or without its line break.
///
/// Returns `None` if any mandatory field is missing or malformed. The file
/// path is kept only when it is separated from the inode by blanks, is no
/// longer than `max_file_path_len` bytes and is followed by a line break.
pub fn parse_line(line: &str, max_file_path_len: usize) -> Option<MemoryRegionRecord> {
    parse_line_bytes(line.as_bytes(), max_file_path_len)
}

/// Same as [`parse_line`] over raw bytes. The file path keeps its bytes
/// verbatim, including ones that are not valid UTF-8.
pub fn parse_line_bytes(line: &[u8], max_file_path_len: usize) -> Option<MemoryRegionRecord> {
    let (body, terminated) = match line.strip_suffix(b"\n") {
        Some(body) => (body, true),
        None => (line, false),
    };

    let mut rest = body;

    let (start, end) = next_field(&mut rest)?.split_once('-')?;
    let start = usize::from_str_radix(start, 16).ok()?;
    let end = usize::from_str_radix(end, 16).ok()?;

    let permissions = Permissions::parse(next_field(&mut rest)?)?;
    let offset = u64::from_str_radix(next_field(&mut rest)?, 16).ok()?;

    // The kernel prints device numbers in hex.
    let (major, minor) = next_field(&mut rest)?.split_once(':')?;
    let dev_major = u32::from_str_radix(major, 16).ok()?;
    let dev_minor = u32::from_str_radix(minor, 16).ok()?;

    let inode = next_field(&mut rest)?.parse::<u64>().ok()?;

    Some(MemoryRegionRecord {
        start,
        end,
        permissions,
        offset,
        dev_major,
        dev_minor,
        inode,
        file_path: trailing_path(rest, terminated, max_file_path_len),
    })
}

fn trim_separators(mut bytes: &[u8]) -> &[u8] {
    while let [first, tail @ ..] = bytes {
        if !FIELD_SEPARATORS.contains(first) {
            break;
        }
        bytes = tail;
    }
    bytes
}

/// Next blank-separated field. Mandatory fields are ASCII, so a field that
/// is not valid UTF-8 is malformed.
fn next_field<'a>(rest: &mut &'a [u8]) -> Option<&'a str> {
    let trimmed = trim_separators(rest);
    let end = trimmed
        .iter()
        .position(|b| FIELD_SEPARATORS.contains(b))
        .unwrap_or(trimmed.len());

    if end == 0 {
        return None;
    }

    let (field, tail) = trimmed.split_at(end);
    *rest = tail;

    core::str::from_utf8(field).ok()
}

fn trailing_path(rest: &[u8], terminated: bool, max_len: usize) -> Option<PathBuf> {
    let path = trim_separators(rest);

    let separated = path.len() < rest.len();
    if !separated || !terminated || path.is_empty() || path.len() > max_len {
        return None;
    }

    Some(path_from_bytes(path))
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}
