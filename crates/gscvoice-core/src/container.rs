//! GSCF header check.
//!
//! A GSC container starts with the `GSCF` magic and records its own length,
//! minus a fixed 32-byte padding, at offset 8. Anything that fails either
//! check is rejected before any scanning happens.

use crate::error::{Error, FormatIssue, Result};
use crate::scanner::Scanner;
use tracing::debug;

/// `GSCF` (Game Scenario Contents of File), read big-endian
pub const MAGIC: u32 = 0x4753_4346;

/// Offset of the little-endian size field
pub const SIZE_OFFSET: usize = 8;

/// Bytes the size field does not account for
pub const SIZE_PADDING: usize = 32;

/// Fields of a header that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Size from the header, excluding [`SIZE_PADDING`]
    pub declared_size: u16,
}

impl ContainerHeader {
    /// Total container length implied by the header
    pub fn total_len(&self) -> usize {
        self.declared_size as usize + SIZE_PADDING
    }
}

/// Checks that `data` is a GSC container.
///
/// The magic is checked first, then the size field against `data.len()`.
pub fn validate(data: &[u8]) -> Result<ContainerHeader> {
    let reader = Scanner::new(data);
    let too_short = || Error::invalid_format(FormatIssue::TooShort { actual: data.len() });

    let magic = reader.read_u32_be_at(0).map_err(|_| too_short())?;
    if magic != MAGIC {
        return Err(Error::invalid_format(FormatIssue::BadMagic { found: magic }));
    }

    let declared_size = reader.read_u16_le_at(SIZE_OFFSET).map_err(|_| too_short())?;
    let header = ContainerHeader { declared_size };
    if header.total_len() != data.len() {
        return Err(Error::invalid_format(FormatIssue::SizeMismatch {
            declared: declared_size,
            actual: data.len(),
        }));
    }

    debug!("Valid GSCF header, {} bytes", data.len());
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(len: usize) -> Vec<u8> {
        let mut data = vec![0u8; len];
        data[..4].copy_from_slice(b"GSCF");
        let size = (len - SIZE_PADDING) as u16;
        data[SIZE_OFFSET..SIZE_OFFSET + 2].copy_from_slice(&size.to_le_bytes());
        data
    }

    #[test]
    fn test_valid_header() {
        let data = container(64);
        let header = validate(&data).unwrap();
        assert_eq!(header.declared_size, 32);
        assert_eq!(header.total_len(), 64);
    }

    #[test]
    fn test_bad_magic() {
        let mut data = container(64);
        data[3] = b'G';
        match validate(&data).unwrap_err() {
            Error::InvalidFormat {
                reason: FormatIssue::BadMagic { found },
            } => assert_eq!(found, 0x4753_4347),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_size_mismatch() {
        let mut data = container(64);
        data.push(0);
        assert!(matches!(
            validate(&data).unwrap_err(),
            Error::InvalidFormat {
                reason: FormatIssue::SizeMismatch {
                    declared: 32,
                    actual: 65
                }
            }
        ));
    }

    #[test]
    fn test_size_field_is_little_endian() {
        let mut data = container(0x120);
        assert!(validate(&data).is_ok());
        data.swap(SIZE_OFFSET, SIZE_OFFSET + 1);
        assert!(validate(&data).is_err());
    }

    #[test]
    fn test_every_magic_byte_matters() {
        for i in 0..4 {
            let mut data = container(40);
            data[i] ^= 0x01;
            assert!(validate(&data).is_err(), "byte {i} flipped");
        }
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            validate(b"GSC").unwrap_err(),
            Error::InvalidFormat {
                reason: FormatIssue::TooShort { actual: 3 }
            }
        ));
        assert!(matches!(
            validate(b"GSCF\0\0\0\0\0").unwrap_err(),
            Error::InvalidFormat {
                reason: FormatIssue::TooShort { actual: 9 }
            }
        ));
    }
}
