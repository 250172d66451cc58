//! Structural markers inside a GSC container.
//!
//! Each marker is a 4-byte pattern compared as a big-endian `u32` against the
//! scanner's current window.

use std::fmt;

/// Known 32-bit sentinels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Sentinel {
    /// `01 00 03 00`, start of the cutscene data
    CutsceneStart = 0x0100_0300,
    /// `01 02 43 06`, voice line played during a cutscene
    MainVoice = 0x0102_4306,
    /// `08 76 02 00`, voice line played in the background of a fight
    BackgroundVoice = 0x0876_0200,
    /// `GSDT`, start of the scenario data table
    DataTable = 0x4753_4454,
    /// `EOFC`, end of the file contents
    EndOfContents = 0x454F_4643,
}

impl Sentinel {
    /// Both voice-line command kinds
    pub const VOICE_COMMANDS: [Sentinel; 2] = [Sentinel::MainVoice, Sentinel::BackgroundVoice];

    /// The raw 32-bit value as read big-endian
    pub const fn value(self) -> u32 {
        self as u32
    }

    /// The on-disk byte pattern
    pub const fn to_bytes(self) -> [u8; 4] {
        self.value().to_be_bytes()
    }

    /// Returns true for either voice-line command
    pub fn is_voice_command(self) -> bool {
        matches!(self, Sentinel::MainVoice | Sentinel::BackgroundVoice)
    }
}

impl TryFrom<u32> for Sentinel {
    type Error = u32;

    fn try_from(value: u32) -> std::result::Result<Self, u32> {
        match value {
            0x0100_0300 => Ok(Sentinel::CutsceneStart),
            0x0102_4306 => Ok(Sentinel::MainVoice),
            0x0876_0200 => Ok(Sentinel::BackgroundVoice),
            0x4753_4454 => Ok(Sentinel::DataTable),
            0x454F_4643 => Ok(Sentinel::EndOfContents),
            other => Err(other),
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sentinel::CutsceneStart => "cutscene start",
            Sentinel::MainVoice => "main voice command",
            Sentinel::BackgroundVoice => "background voice command",
            Sentinel::DataTable => "GSDT",
            Sentinel::EndOfContents => "EOFC",
        };
        write!(f, "{} ({:08X})", name, self.value())
    }
}
