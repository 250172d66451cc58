//! Voice-line extraction from GSC containers.
//!
//! ## Algorithm Overview
//!
//! 1. Validate the GSCF header
//! 2. Scan from the start of the file for the cutscene-start sentinel
//! 3. Keep scanning for voice-line commands, collecting the table pointer
//!    stored 9 bytes into each one, until the `GSDT` sentinel
//! 4. Skip the GSDT header and walk the table in 4-byte steps, picking up
//!    the identifier at every collected pointer
//! 5. Sort the identifiers and infer the unused ones from the gaps
//!
//! Any scan or read that runs off the end of the file fails the whole
//! extraction; nothing is reported for a partially walked container.

mod gaps;
mod offsets;
mod resolver;

use crate::container;
use crate::error::{Error, Result};
use crate::scanner::{Scanner, Sentinel};
use tracing::debug;

pub use gaps::unused_ids;
pub use offsets::{CandidateOffsets, OffsetCollector};
pub use resolver::{OffsetResolver, ENTRY_STRIDE};

/// Sentinels the command scan stops on
const COMMAND_SCAN_TARGETS: [Sentinel; 3] = [
    Sentinel::VOICE_COMMANDS[0],
    Sentinel::VOICE_COMMANDS[1],
    Sentinel::DataTable,
];

/// Configuration for the extractor
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Collapse repeated identifiers before gap analysis
    pub dedupe_identifiers: bool,
    /// Bytes skipped after the GSDT scan before the first table entry
    pub table_header_len: usize,
    /// Distance from a voice-line command to its table pointer
    pub pointer_skip: usize,
    /// Multiplier turning a raw pointer into a byte offset
    pub offset_scale: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            dedupe_identifiers: false,
            table_header_len: 15,
            // command (4) + character pointer (4) + 0x0A type byte (1)
            pointer_skip: 9,
            offset_scale: 4,
        }
    }
}

impl ExtractorConfig {
    /// Creates a new extractor config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether repeated identifiers are collapsed
    pub fn dedupe_identifiers(mut self, dedupe: bool) -> Self {
        self.dedupe_identifiers = dedupe;
        self
    }

    /// Sets the GSDT header length
    pub fn table_header_len(mut self, len: usize) -> Self {
        self.table_header_len = len;
        self
    }

    /// Sets the command-to-pointer distance
    pub fn pointer_skip(mut self, skip: usize) -> Self {
        self.pointer_skip = skip;
        self
    }

    /// Sets the pointer multiplier
    pub fn offset_scale(mut self, scale: u32) -> Self {
        self.offset_scale = scale;
        self
    }
}

/// Counters describing one extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Offset of the cutscene-start sentinel
    pub cutscene_offset: usize,
    /// Offset of the `GSDT` sentinel
    pub gsdt_offset: usize,
    /// Voice-line commands found, duplicates included
    pub command_matches: usize,
    /// Distinct table offsets the commands point at
    pub candidate_offsets: usize,
    /// Identifiers found at those offsets
    pub resolved: usize,
}

/// Present and unused voice-line identifiers of one container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceLineReport {
    /// Identifiers referenced by the scenario, ascending
    pub present: Vec<u16>,
    /// Identifiers between present ones that the scenario never uses, ascending
    pub unused: Vec<u16>,
    /// Extraction counters
    pub stats: ExtractStats,
}

/// Extracts voice-line identifiers from GSC containers
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Creates a new extractor with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new extractor with custom configuration
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Runs the full extraction over an in-memory container
    pub fn extract(&self, data: &[u8]) -> Result<VoiceLineReport> {
        container::validate(data)?;

        let mut scanner = Scanner::new(data);
        let (cutscene_offset, _) = scanner.seek_any(&[Sentinel::CutsceneStart])?;
        debug!("Cutscene data starts at {:#x}", cutscene_offset);

        let (gsdt_offset, offsets) = self.collect_offsets(&mut scanner)?;
        debug!(
            "GSDT at {:#x}: {} voice-line commands, {} distinct pointers",
            gsdt_offset,
            offsets.matches(),
            offsets.len()
        );

        let table_start = scanner.position() + self.config.table_header_len;
        let mut present = OffsetResolver::new(data, table_start).resolve(&offsets)?;
        let resolved = present.len();

        present.sort_unstable();
        if self.config.dedupe_identifiers {
            present.dedup();
        }
        let unused = unused_ids(&present);

        debug!(
            "Resolved {} of {} pointers, {} unused identifiers",
            resolved,
            offsets.len(),
            unused.len()
        );

        Ok(VoiceLineReport {
            present,
            unused,
            stats: ExtractStats {
                cutscene_offset,
                gsdt_offset,
                command_matches: offsets.matches(),
                candidate_offsets: offsets.len(),
                resolved,
            },
        })
    }

    /// Collects voice-line pointers up to the `GSDT` sentinel.
    ///
    /// Returns the sentinel's offset and the collected pointers. The scanner
    /// is left one byte past the sentinel.
    fn collect_offsets(&self, scanner: &mut Scanner<'_>) -> Result<(usize, CandidateOffsets)> {
        let mut collector = OffsetCollector::new(self.config.offset_scale);

        loop {
            let (pos, found) = scanner.seek_any(&COMMAND_SCAN_TARGETS)?;
            if !found.is_voice_command() {
                return Ok((pos, collector.finish()));
            }

            let pointer_at = pos + self.config.pointer_skip;
            collector.push(scanner.read_u16_le_at(pointer_at)?);
            scanner.seek(pointer_at + 1);
        }
    }
}

/// Read a file and extract its voice-line identifiers
pub fn extract_file(path: impl AsRef<std::path::Path>) -> Result<VoiceLineReport> {
    extract_file_with_config(path, ExtractorConfig::default())
}

/// Read a file and extract its voice-line identifiers with custom configuration
pub fn extract_file_with_config(
    path: impl AsRef<std::path::Path>,
    config: ExtractorConfig,
) -> Result<VoiceLineReport> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    Extractor::with_config(config).extract(&data)
}
