//! Byte cursor for finding sentinels in a GSC container.
//!
//! This module provides a bounds-checked cursor that walks a container one
//! byte at a time, looking for 32-bit sentinel values.
//!
//! ## Algorithm Overview
//!
//! 1. Read a big-endian `u32` window at the cursor
//! 2. If the window is one of the requested sentinels, report the match
//! 3. Otherwise advance the cursor by a single byte and repeat
//!
//! Sentinels are not 4-byte aligned inside the container, which is why the
//! window slides by one byte instead of four. Every step leaves the cursor
//! one byte past the start of the window it just read, matched or not.
//!
//! ## Example
//!
//! ```
//! use gscvoice_core::scanner::{Scanner, Sentinel};
//!
//! let data = [0xAA, 0x01, 0x00, 0x03, 0x00, 0xBB];
//! let mut scanner = Scanner::new(&data);
//! let (pos, found) = scanner.seek_any(&[Sentinel::CutsceneStart])?;
//! assert_eq!((pos, found), (1, Sentinel::CutsceneStart));
//! assert_eq!(scanner.position(), 2);
//! # Ok::<(), gscvoice_core::Error>(())
//! ```

mod sentinel;

use crate::error::{Error, Result};
use bytes::Buf;
use tracing::trace;

pub use sentinel::Sentinel;

/// Width of the sentinel window in bytes
pub const WINDOW_LEN: usize = 4;

/// Bounds-checked cursor over a container's bytes
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Creates a new scanner positioned at `position`
    pub fn at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Current cursor position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to an absolute position
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Moves the cursor forward by `count` bytes
    pub fn skip(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    /// Total length of the underlying data
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the underlying data is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `needed` bytes at `offset`, or a truncation error
    fn slice_at(&self, offset: usize, needed: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(needed)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| Error::truncated(offset, needed, self.data.len()))
    }

    /// Reads a little-endian `u16` at an absolute offset
    pub fn read_u16_le_at(&self, offset: usize) -> Result<u16> {
        Ok(self.slice_at(offset, 2)?.get_u16_le())
    }

    /// Reads a big-endian `u32` at an absolute offset
    pub fn read_u32_be_at(&self, offset: usize) -> Result<u32> {
        Ok(self.slice_at(offset, WINDOW_LEN)?.get_u32())
    }

    /// Slides the window forward until it equals one of `targets`.
    ///
    /// Returns the offset of the matched window and which sentinel it was.
    /// The cursor is left one byte past the matched window's start. If the
    /// data ends first, returns [`Error::NoMatchFound`] and leaves the cursor
    /// at the first position where a full window no longer fits.
    pub fn seek_any(&mut self, targets: &[Sentinel]) -> Result<(usize, Sentinel)> {
        let start = self.position;

        while self.position.saturating_add(WINDOW_LEN) <= self.data.len() {
            let pos = self.position;
            let window = self.read_u32_be_at(pos)?;
            self.position += 1;

            if let Some(&found) = targets.iter().find(|s| s.value() == window) {
                trace!("Found {} at offset {:#x}", found, pos);
                return Ok((pos, found));
            }
        }

        Err(Error::no_match(targets, start))
    }
}
