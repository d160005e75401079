// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::path::Path;

use protmap_test_utils::{ProcFixture, TWO_REGION_MAPS};

use crate::config::MapsConfig;
use crate::error::MapsError;
use crate::source::MapSource;

const PID: u32 = 4242;

fn open_fixture(contents: &str) -> (ProcFixture, MapSource) {
    let fixture = ProcFixture::with_maps(PID, contents);
    let config = MapsConfig::default().with_proc_root(fixture.root());
    let source = MapSource::open(PID, &config).expect("Failed to open(..)");

    (fixture, source)
}

// =============================================================================
// open() / close()
// =============================================================================

#[test]
fn test_open_missing_process_fails() {
    let fixture = ProcFixture::new();
    let config = MapsConfig::default().with_proc_root(fixture.root());

    let result = MapSource::open(PID, &config);

    assert!(matches!(result, Err(MapsError::Open { .. })));
}

#[test]
fn test_open_reports_path_too_long() {
    let config = MapsConfig::default().with_max_map_path_len(4);

    let result = MapSource::open(PID, &config);

    assert!(matches!(result, Err(MapsError::PathTooLong { .. })));
}

#[test]
fn test_open_self_and_close() {
    let source = MapSource::open_self(&MapsConfig::default()).expect("Failed to open_self(..)");

    assert!(source.path().ends_with("maps"));
    source.close().expect("Failed to close()");
}

// =============================================================================
// parse_next()
// =============================================================================

#[test]
fn test_parse_next_yields_records_in_order() {
    let (_fixture, mut source) = open_fixture(TWO_REGION_MAPS);

    let first = source
        .parse_next()
        .expect("Failed to parse_next()")
        .expect("expected first record");
    let second = source
        .parse_next()
        .expect("Failed to parse_next()")
        .expect("expected second record");

    assert_eq!(first.start, 0x1000);
    assert_eq!(first.file_path.as_deref(), Some(Path::new("/lib/x")));
    assert_eq!(second.start, 0x3000);
    assert_eq!(second.file_path, None);

    assert!(source.parse_next().expect("Failed to parse_next()").is_none());
}

#[test]
fn test_parse_next_skips_blank_lines() {
    let (_fixture, mut source) = open_fixture("\n\n1000-2000 r-xp 00000000 08:01 1 /a\n\n");

    let record = source.parse_next().expect("Failed to parse_next()");

    assert_eq!(record.map(|r| r.start), Some(0x1000));
    assert!(source.parse_next().expect("Failed to parse_next()").is_none());
}

#[test]
fn test_parse_next_stops_at_malformed_line() {
    let (_fixture, mut source) = open_fixture(
        concat!(
            "1000-2000 r-xp 00000000 08:01 1 /a\n",
            "garbage\n",
            "3000-4000 rw-p 00000000 00:00 0\n",
        ),
    );

    assert!(source.parse_next().expect("Failed to parse_next()").is_some());
    assert!(source.parse_next().expect("Failed to parse_next()").is_none());
}

#[test]
#[cfg(unix)]
fn test_parse_next_keeps_invalid_utf8_path_bytes() {
    use std::os::unix::ffi::OsStrExt;

    let fixture = ProcFixture::new();
    let path = fixture.write_maps(PID, "");
    std::fs::write(&path, b"1000-2000 r-xp 00000000 08:01 1 /lib/\xff\n")
        .expect("Failed to write(..)");

    let config = MapsConfig::default().with_proc_root(fixture.root());
    let mut source = MapSource::open(PID, &config).expect("Failed to open(..)");

    let record = source
        .parse_next()
        .expect("Failed to parse_next()")
        .expect("expected record");

    assert_eq!(record.start, 0x1000);
    let path = record.file_path.expect("expected path");
    assert_eq!(path.as_os_str().as_bytes(), b"/lib/\xff");
}

// =============================================================================
// dump_remaining()
// =============================================================================

#[test]
fn test_dump_writes_whole_description() {
    let (_fixture, mut source) = open_fixture(TWO_REGION_MAPS);
    let mut out = Vec::new();

    source.dump_remaining(&mut out).expect("Failed to dump_remaining(..)");

    assert_eq!(out, TWO_REGION_MAPS.as_bytes());
}

#[test]
fn test_dump_of_fixture_is_exactly_two_lines() {
    let (_fixture, mut source) = open_fixture(TWO_REGION_MAPS);
    let mut out = Vec::new();

    source.dump_remaining(&mut out).expect("Failed to dump_remaining(..)");

    let expected: &[u8] = b"1000-2000 r-xp 00000000 08:01 1234 /lib/x\n3000-4000 rw-p 00000000 00:00 0\n";
    assert_eq!(out, expected);
    assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 2);
}

#[test]
fn test_dump_after_partial_scan_restores_cursor() {
    let (_fixture, mut source) = open_fixture(TWO_REGION_MAPS);

    let first = source.parse_next().expect("Failed to parse_next()");
    assert!(first.is_some());

    let before = source.position().expect("Failed to position()");
    let mut out = Vec::new();
    source.dump_remaining(&mut out).expect("Failed to dump_remaining(..)");
    let after = source.position().expect("Failed to position()");

    // Whole content, not just the unread tail.
    assert_eq!(out, TWO_REGION_MAPS.as_bytes());
    assert_eq!(before, after);

    let second = source
        .parse_next()
        .expect("Failed to parse_next()")
        .expect("expected second record");
    assert_eq!(second.start, 0x3000);
    assert!(source.parse_next().expect("Failed to parse_next()").is_none());
}

#[test]
fn test_dump_of_live_map_preserves_scan() {
    let config = MapsConfig::default();
    let mut dumped = MapSource::open_self(&config).expect("Failed to open_self(..)");

    let first = dumped.parse_next().expect("Failed to parse_next()");
    assert!(first.is_some());
    let mut out = Vec::new();
    dumped.dump_remaining(&mut out).expect("Failed to dump_remaining(..)");

    let second = dumped
        .parse_next()
        .expect("Failed to parse_next()")
        .expect("expected second record");

    assert!(!out.is_empty());
    assert!(second.start >= first.map(|r| r.end).unwrap_or(0));
}
