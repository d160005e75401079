// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! MapSource - an owned, open map description.
//!
//! Holds the stream, its read cursor and the line buffer used by the parser.
//! Nothing is shared between sources.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::config::MapsConfig;
use crate::error::MapsError;
use crate::parser::parse_line_bytes;
use crate::record::MemoryRegionRecord;

/// An open map description with its own read cursor and line buffer.
#[derive(Debug)]
pub struct MapSource {
    path: PathBuf,
    reader: BufReader<File>,
    line: Vec<u8>,
    max_file_path_len: usize,
}

impl MapSource {
    /// Opens the map description of process `pid` under `config.proc_root`.
    pub fn open(pid: u32, config: &MapsConfig) -> Result<Self, MapsError> {
        let path = config.maps_path(pid)?;
        Self::open_path(path, config)
    }

    /// Opens the map description of the calling process.
    pub fn open_self(config: &MapsConfig) -> Result<Self, MapsError> {
        Self::open(std::process::id(), config)
    }

    /// Opens a map description at an explicit path.
    pub fn open_path(path: impl Into<PathBuf>, config: &MapsConfig) -> Result<Self, MapsError> {
        let path = path.into();

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(source) => return Err(MapsError::Open { path, source }),
        };

        debug!("opened map description {}", path.display());

        Ok(Self {
            path,
            reader: BufReader::new(file),
            line: Vec::new(),
            max_file_path_len: config.max_file_path_len,
        })
    }

    /// Path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the next record, advancing the cursor past the consumed line.
    ///
    /// Blank lines are skipped. Returns `Ok(None)` at end of stream and for a
    /// line whose mandatory fields do not match; in both cases the caller
    /// must stop scanning.
    pub fn parse_next(&mut self) -> Result<Option<MemoryRegionRecord>, MapsError> {
        loop {
            self.line.clear();

            let read = self
                .reader
                .read_until(b'\n', &mut self.line)
                .map_err(MapsError::Read)?;

            if read == 0 {
                return Ok(None);
            }

            if self.line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let record = parse_line_bytes(&self.line, self.max_file_path_len);

            match &record {
                Some(record) => trace!("parsed {}", record.mandatory_fields()),
                None => debug!(
                    "malformed map line: {:?}",
                    String::from_utf8_lossy(self.line.trim_ascii_end())
                ),
            }

            return Ok(record);
        }
    }

    /// Current read position in bytes from the start of the description.
    pub fn position(&mut self) -> Result<u64, MapsError> {
        self.reader.stream_position().map_err(MapsError::SavePosition)
    }

    /// Copies the whole description, from byte zero, to `out`, then puts the
    /// read cursor back where it was.
    ///
    /// The cursor is restored even when the copy fails.
    pub fn dump_remaining<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), MapsError> {
        let position = self.position()?;

        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(MapsError::Rewind)?;

        let dumped = io::copy(&mut self.reader, out)
            .and_then(|_| out.flush())
            .map_err(MapsError::Dump);

        let restored = self
            .reader
            .seek(SeekFrom::Start(position))
            .map_err(MapsError::RestorePosition)?;

        if restored != position {
            return Err(MapsError::RestorePosition(io::Error::other(format!(
                "cursor landed at {restored}, expected {position}"
            ))));
        }

        dumped
    }

    /// Releases the stream.
    pub fn close(self) -> Result<(), MapsError> {
        debug!("closing map description {}", self.path.display());
        close_file(self.reader.into_inner())
    }
}

#[cfg(unix)]
fn close_file(file: File) -> Result<(), MapsError> {
    use std::os::fd::IntoRawFd;

    let fd = file.into_raw_fd();
    let failed = unsafe { libc::close(fd) } != 0;

    if failed {
        return Err(MapsError::Close(io::Error::last_os_error()));
    }

    Ok(())
}

#[cfg(not(unix))]
fn close_file(file: File) -> Result<(), MapsError> {
    drop(file);
    Ok(())
}
