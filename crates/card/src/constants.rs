//! Constants used by the LAYR applet
//!
//! Class bytes, instruction codes and fixed payloads understood by the
//! emulated card.

/// Command classes
pub mod cla {
    /// ISO7816 interindustry class, used by SELECT
    pub const ISO7816: u8 = 0x00;
    /// Proprietary class for LAYR instructions
    pub const PROPRIETARY: u8 = 0x80;
}

/// Instruction codes
pub mod ins {
    /// SELECT command
    pub const SELECT: u8 = 0xA4;
    /// AUTH_INIT command
    pub const AUTH_INIT: u8 = 0x10;
}

/// Parameter values for SELECT command (P1)
pub mod select_p1 {
    /// Select by DF name
    pub const BY_NAME: u8 = 0x04;
}

/// Parameter values for SELECT command (P2)
pub mod select_p2 {
    /// First or only occurrence
    pub const FIRST_OR_ONLY: u8 = 0x00;
}

/// Application identifier of the LAYR applet
pub const LAYR_AID: [u8; 6] = [0xF0, 0xBA, 0xAA, 0xAA, 0xAD, 0x01];

/// Length of the AUTH_INIT payload
pub const AUTH_INIT_PATTERN_LEN: usize = 16;

/// Byte repeated throughout the AUTH_INIT payload (1010 1010)
pub const AUTH_INIT_PATTERN_BYTE: u8 = 0xAA;

/// AUTH_INIT payload
pub const AUTH_INIT_PATTERN: [u8; AUTH_INIT_PATTERN_LEN] =
    [AUTH_INIT_PATTERN_BYTE; AUTH_INIT_PATTERN_LEN];
