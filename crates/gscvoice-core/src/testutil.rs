//! Synthetic container construction for tests.

use crate::container::{MAGIC, SIZE_OFFSET, SIZE_PADDING};
use crate::scanner::Sentinel;

/// Length of the fixed header the builder writes
pub(crate) const HEADER_LEN: usize = 16;

/// Builds a GSC container with a correct size field
#[derive(Debug, Clone, Default)]
pub(crate) struct ContainerBuilder {
    body: Vec<u8>,
}

impl ContainerBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bytes(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self
    }

    pub(crate) fn sentinel(self, sentinel: Sentinel) -> Self {
        self.bytes(&sentinel.to_bytes())
    }

    /// Command, zeroed character pointer, `0x0A` tag, table pointer
    pub(crate) fn voice_command(self, kind: Sentinel, pointer: u16) -> Self {
        self.sentinel(kind)
            .bytes(&[0x00; 4])
            .bytes(&[0x0A])
            .bytes(&pointer.to_le_bytes())
    }

    /// `GSDT`, header padding, one 4-byte entry per id, then a final entry
    /// whose trailing word is `EOFC`
    pub(crate) fn data_table(mut self, ids: &[u16]) -> Self {
        self = self.sentinel(Sentinel::DataTable).bytes(&[0x00; 12]);
        for id in ids {
            self = self.bytes(&id.to_le_bytes()).bytes(&[0x00; 2]);
        }
        self.bytes(&[0xAA; 2]).sentinel(Sentinel::EndOfContents)
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[..4].copy_from_slice(&MAGIC.to_be_bytes());
        data.extend_from_slice(&self.body);
        if data.len() < SIZE_PADDING {
            data.resize(SIZE_PADDING, 0);
        }

        let size = u16::try_from(data.len() - SIZE_PADDING).expect("test container too large");
        data[SIZE_OFFSET..SIZE_OFFSET + 2].copy_from_slice(&size.to_le_bytes());
        data
    }
}
