// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for protmap-maps.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Resource errors raised while opening, reading or closing a map stream.
///
/// The `Display` form of each variant is the one-line diagnostic written to
/// standard error when the error is absorbed by [`crate::RegionLookup`].
#[derive(Debug, Error)]
pub enum MapsError {
    /// The map path for the requested process exceeds the configured bound.
    #[error("Couldn't create file path! ({len} bytes, limit is {max})")]
    PathTooLong {
        /// Length of the path that would have been opened.
        len: usize,
        /// Configured bound.
        max: usize,
    },

    /// The map description could not be opened.
    #[error("Couldn't open \"{}\"! Reason: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Reading the next line failed.
    #[error("Failed to read process map file! Reason: {0}")]
    Read(#[source] io::Error),

    /// The current read position could not be queried.
    #[error("Failed to save current offset of file! Reason: {0}")]
    SavePosition(#[source] io::Error),

    /// Seeking back to the start of the map failed.
    #[error("Failed to set offset to file start! Reason: {0}")]
    Rewind(#[source] io::Error),

    /// Copying the map contents to the output failed.
    #[error("Failed to dump process map file! Reason: {0}")]
    Dump(#[source] io::Error),

    /// The saved read position could not be restored.
    #[error("Failed to restore offset in file! Reason: {0}")]
    RestorePosition(#[source] io::Error),

    /// Releasing the underlying descriptor failed.
    #[error("Failed to close open process map file! Reason: {0}")]
    Close(#[source] io::Error),
}

/// Writes the one-line diagnostic for an absorbed error.
pub(crate) fn report(error: &MapsError) {
    eprintln!("Error: {error}");
}
