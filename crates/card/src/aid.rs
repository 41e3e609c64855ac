//! Application identifiers

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use derive_more::Deref;
use thiserror::Error;

use crate::constants::LAYR_AID;

/// Longest AID allowed by ISO/IEC 7816-5
pub const MAX_AID_LEN: usize = 16;

/// Errors raised when configuring an [`Aid`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AidError {
    /// No bytes at all
    #[error("AID must not be empty")]
    Empty,

    /// More than [`MAX_AID_LEN`] bytes
    #[error("AID is {0} bytes long, at most 16 are allowed")]
    TooLong(usize),

    /// Not a hex string
    #[error("AID is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Immutable application identifier, compared by exact byte equality
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref)]
#[deref(forward)]
pub struct Aid(Bytes);

impl Aid {
    /// Create an AID from raw bytes
    pub fn new(bytes: impl Into<Bytes>) -> Result<Self, AidError> {
        let bytes = bytes.into();
        match bytes.len() {
            0 => Err(AidError::Empty),
            len if len > MAX_AID_LEN => Err(AidError::TooLong(len)),
            _ => Ok(Self(bytes)),
        }
    }

    /// The LAYR applet identifier, `F0 BA AA AA AD 01`
    pub fn layr() -> Self {
        Self(Bytes::from_static(&LAYR_AID))
    }

    /// The identifier bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for Aid {
    fn default() -> Self {
        Self::layr()
    }
}

impl AsRef<[u8]> for Aid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Aid {
    type Err = AidError;

    /// Parse a hex string; whitespace between bytes is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        Self::new(hex::decode(compact)?)
    }
}

impl fmt::Display for Aid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(&self.0))
    }
}
