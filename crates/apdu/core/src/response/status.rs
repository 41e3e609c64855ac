//! Status word definitions for APDU responses

use std::fmt;

use derive_more::Display;
use tracing::Level;

/// Status Word (SW1-SW2) from an APDU response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    /// First status byte (SW1)
    pub sw1: u8,
    /// Second status byte (SW2)
    pub sw2: u8,
}

impl StatusWord {
    /// Create a new status word
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Create from a u16 value (SW1 | SW2)
    pub const fn from_u16(status: u16) -> Self {
        Self {
            sw1: (status >> 8) as u8,
            sw2: status as u8,
        }
    }

    /// Convert to a u16 value (SW1 | SW2)
    pub const fn to_u16(&self) -> u16 {
        ((self.sw1 as u16) << 8) | (self.sw2 as u16)
    }

    /// Check if this status word indicates success (90 00)
    pub const fn is_success(&self) -> bool {
        self.sw1 == 0x90 && self.sw2 == 0x00
    }

    /// Check if this status word indicates a warning (62 XX or 63 XX)
    pub const fn is_warning(&self) -> bool {
        self.sw1 == 0x62 || self.sw1 == 0x63
    }

    /// Get the appropriate tracing level for this status word
    pub const fn tracing_level(&self) -> Level {
        if self.is_success() {
            Level::DEBUG
        } else if self.is_warning() {
            Level::INFO
        } else {
            Level::WARN
        }
    }

    /// Get a description of this status word
    pub const fn description(&self) -> &'static str {
        match (self.sw1, self.sw2) {
            (0x90, 0x00) => "Success",
            (0x61, _) => "More data available",
            (0x62, 0x00) => "No information given",
            (0x63, 0x00) => "No information given",
            (0x67, 0x00) => "Wrong length",
            (0x69, 0x82) => "Security status not satisfied",
            (0x69, 0x86) => "Command not allowed",
            (0x6A, 0x82) => "File not found",
            (0x6A, 0x86) => "Incorrect parameters P1-P2",
            (0x6D, 0x00) => "Instruction code not supported or invalid",
            (0x6E, 0x00) => "Class not supported",
            (0x6F, 0x00) => "No precise diagnosis",
            _ => "Unknown status word",
        }
    }
}

impl From<(u8, u8)> for StatusWord {
    fn from(tuple: (u8, u8)) -> Self {
        Self::new(tuple.0, tuple.1)
    }
}

impl From<u16> for StatusWord {
    fn from(status: u16) -> Self {
        Self::from_u16(status)
    }
}

impl From<StatusWord> for u16 {
    fn from(status: StatusWord) -> Self {
        status.to_u16()
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {:02X}", self.sw1, self.sw2)
    }
}

/// Outcomes the emulated card can report.
///
/// This is the only place the card-side status codes are spelled out as
/// bytes; everything else goes through [`Status::word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Status {
    /// Normal processing (90 00)
    #[display("success")]
    Success,
    /// Instruction code not supported or invalid (6D 00)
    #[display("instruction not supported")]
    InsNotSupported,
    /// Class not supported (6E 00)
    #[display("class not supported")]
    ClaNotSupported,
}

impl Status {
    /// The wire status word for this outcome
    pub const fn word(self) -> StatusWord {
        match self {
            Self::Success => StatusWord::new(0x90, 0x00),
            Self::InsNotSupported => StatusWord::new(0x6D, 0x00),
            Self::ClaNotSupported => StatusWord::new(0x6E, 0x00),
        }
    }
}

impl From<Status> for StatusWord {
    fn from(status: Status) -> Self {
        status.word()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_word_from_to_u16() {
        let sw = StatusWord::from_u16(0x6D00);
        assert_eq!(sw.sw1, 0x6D);
        assert_eq!(sw.sw2, 0x00);
        assert_eq!(sw.to_u16(), 0x6D00);
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(Status::Success.word().to_u16(), 0x9000);
        assert_eq!(Status::InsNotSupported.word().to_u16(), 0x6D00);
        assert_eq!(Status::ClaNotSupported.word().to_u16(), 0x6E00);
    }

    #[test]
    fn test_status_word_predicates() {
        assert!(StatusWord::new(0x90, 0x00).is_success());
        assert!(StatusWord::new(0x63, 0xC2).is_warning());
        assert!(!StatusWord::new(0x6E, 0x00).is_success());
    }

    #[test]
    fn test_status_word_description() {
        assert_eq!(Status::Success.word().description(), "Success");
        assert_eq!(
            Status::InsNotSupported.word().description(),
            "Instruction code not supported or invalid"
        );
        assert_eq!(
            Status::ClaNotSupported.word().description(),
            "Class not supported"
        );
        assert_eq!(StatusWord::new(0x12, 0x34).description(), "Unknown status word");
    }

    #[test]
    fn test_tracing_level() {
        assert_eq!(Status::Success.word().tracing_level(), Level::DEBUG);
        assert_eq!(StatusWord::new(0x62, 0x00).tracing_level(), Level::INFO);
        assert_eq!(Status::ClaNotSupported.word().tracing_level(), Level::WARN);
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::InsNotSupported.word().to_string(), "6D 00");
        assert_eq!(Status::ClaNotSupported.to_string(), "class not supported");
    }
}
