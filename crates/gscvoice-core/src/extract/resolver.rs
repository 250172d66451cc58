//! Resolution of candidate offsets against the GSDT entries.

use super::offsets::CandidateOffsets;
use crate::error::Result;
use crate::scanner::{Scanner, Sentinel};
use tracing::{debug, trace};

/// Distance between consecutive table positions
pub const ENTRY_STRIDE: usize = 4;

/// Walks the data table and picks out the identifiers at candidate offsets
#[derive(Debug, Clone)]
pub struct OffsetResolver<'a> {
    reader: Scanner<'a>,
    table_start: usize,
}

impl<'a> OffsetResolver<'a> {
    /// Creates a resolver for a table whose first entry is at `table_start`
    pub fn new(data: &'a [u8], table_start: usize) -> Self {
        Self {
            reader: Scanner::at(data, table_start),
            table_start,
        }
    }

    /// Resolves `offsets` in a single forward pass.
    ///
    /// Each step reads an identifier and the 32-bit word after it. The walk
    /// stops once every offset has been matched, or after the step whose
    /// word is `EOFC`. Offsets are consumed in order, so one that the walk
    /// can never land on leaves the remaining ones unmatched. The returned
    /// identifiers are in table order.
    pub fn resolve(mut self, offsets: &CandidateOffsets) -> Result<Vec<u16>> {
        let wanted = offsets.as_slice();
        let mut ids = Vec::with_capacity(wanted.len());

        if wanted.is_empty() {
            debug!("No voice-line pointers to resolve");
            return Ok(ids);
        }

        loop {
            let pos = self.reader.position();
            let id = self.reader.read_u16_le_at(pos)?;
            let word = self.reader.read_u32_be_at(pos.saturating_add(2))?;

            let relative = pos - self.table_start;
            if u32::try_from(relative).ok() == Some(wanted[ids.len()]) {
                trace!("Voice line {} at table offset {:#x}", id, relative);
                ids.push(id);
            }

            if ids.len() == wanted.len() {
                break;
            }
            if word == Sentinel::EndOfContents.value() {
                debug!("Reached EOFC with {} pointers unresolved", wanted.len() - ids.len());
                break;
            }

            self.reader.skip(ENTRY_STRIDE);
        }

        Ok(ids)
    }
}
