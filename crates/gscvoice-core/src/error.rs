//! Error types for the gscvoice-core library.
//!
//! This module provides error handling using the `thiserror` crate. Every
//! failure is fatal for the container being processed; nothing is retried.

use crate::scanner::Sentinel;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gscvoice operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reason a file was rejected as a GSC container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatIssue {
    /// The file is too small to hold the GSCF header fields
    TooShort {
        /// Actual length of the input
        actual: usize,
    },
    /// The first four bytes are not `GSCF`
    BadMagic {
        /// Big-endian value found at offset 0
        found: u32,
    },
    /// `declared + 32` does not match the file length
    SizeMismatch {
        /// Size field read from the header
        declared: u16,
        /// Actual length of the input
        actual: usize,
    },
}

impl fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { actual } => write!(f, "file is only {actual} bytes long"),
            Self::BadMagic { found } => write!(f, "bad magic {found:#010x}, expected GSCF"),
            Self::SizeMismatch { declared, actual } => write!(
                f,
                "header declares {} bytes but file is {actual} bytes",
                *declared as usize + crate::container::SIZE_PADDING
            ),
        }
    }
}

/// Error type for all gscvoice operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create output directory
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        /// Path to the directory that failed to create
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The input is not a GSC container
    #[error("invalid GSC container: {reason}")]
    InvalidFormat {
        /// What the header check tripped on
        reason: FormatIssue,
    },

    /// A fixed-width read ran past the end of the input
    #[error("truncated input: need {needed} bytes at offset {offset}, only {available} available")]
    TruncatedInput {
        /// Byte offset of the attempted read
        offset: usize,
        /// Width of the attempted read
        needed: usize,
        /// Bytes remaining from `offset`
        available: usize,
    },

    /// A sentinel scan reached the end of the input without a match
    #[error("none of {} found after offset {start}", SentinelList(.sentinels))]
    NoMatchFound {
        /// Sentinels the scan was looking for
        sentinels: Vec<Sentinel>,
        /// Offset the scan started from
        start: usize,
    },
}

struct SentinelList<'a>(&'a [Sentinel]);

impl fmt::Display for SentinelList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sentinel) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{sentinel}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory creation error
    pub fn directory_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new invalid format error
    pub fn invalid_format(reason: FormatIssue) -> Self {
        Self::InvalidFormat { reason }
    }

    /// Creates a new truncated input error for a read of `needed` bytes at `offset`
    pub fn truncated(offset: usize, needed: usize, len: usize) -> Self {
        Self::TruncatedInput {
            offset,
            needed,
            available: len.saturating_sub(offset),
        }
    }

    /// Creates a new exhausted-scan error
    pub fn no_match(sentinels: &[Sentinel], start: usize) -> Self {
        Self::NoMatchFound {
            sentinels: sentinels.to_vec(),
            start,
        }
    }

    /// Returns true if the input ended before the walker was done with it
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. } | Self::NoMatchFound { .. })
    }

    /// Returns true if this error concerns a single container and a batch run may skip it
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. } | Self::TruncatedInput { .. } | Self::NoMatchFound { .. }
        )
    }
}
