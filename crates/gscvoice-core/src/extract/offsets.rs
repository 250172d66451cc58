//! Candidate offset collection from voice-line commands.

use std::collections::BTreeSet;

/// Accumulates voice-line pointers found during the command scan.
///
/// Pointers are kept in a set; the order in which commands are found has no
/// effect on the result.
#[derive(Debug, Clone)]
pub struct OffsetCollector {
    scale: u32,
    offsets: BTreeSet<u32>,
    matches: usize,
}

impl OffsetCollector {
    /// Creates a collector that multiplies each raw pointer by `scale`
    pub fn new(scale: u32) -> Self {
        Self {
            scale,
            offsets: BTreeSet::new(),
            matches: 0,
        }
    }

    /// Records the raw 16-bit pointer of one voice-line command
    pub fn push(&mut self, raw: u16) {
        self.matches += 1;
        self.offsets.insert(u32::from(raw) * self.scale);
    }

    /// Number of commands seen, duplicates included
    pub fn matches(&self) -> usize {
        self.matches
    }

    /// Freezes the collection into ascending order
    pub fn finish(self) -> CandidateOffsets {
        CandidateOffsets {
            offsets: self.offsets.into_iter().collect(),
            matches: self.matches,
        }
    }
}

/// Strictly ascending, duplicate-free offsets relative to the table start
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateOffsets {
    offsets: Vec<u32>,
    matches: usize,
}

impl CandidateOffsets {
    /// The offsets in ascending order
    pub fn as_slice(&self) -> &[u32] {
        &self.offsets
    }

    /// Number of distinct offsets
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns true if no voice-line command was found
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Number of commands the offsets were collected from
    pub fn matches(&self) -> usize {
        self.matches
    }
}

impl FromIterator<u32> for CandidateOffsets {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut matches = 0;
        let offsets: BTreeSet<u32> = iter.into_iter().inspect(|_| matches += 1).collect();
        Self {
            offsets: offsets.into_iter().collect(),
            matches,
        }
    }
}
