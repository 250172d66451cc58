//! # gscvoice-core
//!
//! A library for finding the voice lines a Budokai Tenkaichi 3 scenario
//! (`GSC`) file plays, and the ones it leaves out.
//!
//! This crate provides the core functionality for:
//! - Validating the `GSCF` container header
//! - Scanning the cutscene data for voice-line commands
//! - Resolving the command pointers against the `GSDT` data table
//! - Inferring unused identifiers from the gaps between used ones
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`container`]: Header validation
//! - [`scanner`]: Sentinel search over raw bytes
//! - [`extract`]: Pointer collection, table resolution and gap analysis
//! - [`report`]: Text rendering of identifier lists
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use gscvoice_core::{Extractor, render_id_list};
//! use std::fs;
//!
//! let data = fs::read("GSC")?;
//! let report = Extractor::new().extract(&data)?;
//!
//! print!("{}", render_id_list(&report.present));
//! print!("{}", render_id_list(&report.unused));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod container;
pub mod error;
pub mod extract;
pub mod report;
pub mod scanner;

#[cfg(test)]
mod testutil;

// Re-export primary types for convenience
pub use container::{validate, ContainerHeader};
pub use error::{Error, FormatIssue, Result};
pub use extract::{
    extract_file, extract_file_with_config, unused_ids, ExtractStats, Extractor, ExtractorConfig,
    VoiceLineReport,
};
pub use report::{render_id_list, render_inline, PRESENT_FILE_NAME, UNUSED_FILE_NAME};
pub use scanner::{Scanner, Sentinel};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
