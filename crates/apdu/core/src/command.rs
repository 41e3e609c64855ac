//! APDU command definitions and traits
//!
//! This module provides types for working with ISO/IEC 7816-4 short APDU
//! commands: a typed [`Command`] for building frames, and a borrowed
//! [`RawCommand`] view that reads header fields positionally without ever
//! trusting the frame's own length bytes.

use bytes::{BufMut, Bytes, BytesMut};

use crate::Error;

/// Expected length type for APDU commands
pub type ExpectedLength = u8;

/// Length of the CLA INS P1 P2 header
pub const HEADER_LEN: usize = 4;

/// Offset of the Lc byte
pub const LC_OFFSET: usize = 4;

/// Offset of the first data byte
pub const DATA_OFFSET: usize = 5;

/// Largest data field a one-byte Lc can describe
pub const MAX_DATA_LEN: usize = 255;

/// Core trait for APDU commands
pub trait ApduCommand {
    /// Command class (CLA)
    fn class(&self) -> u8;

    /// Instruction code (INS)
    fn instruction(&self) -> u8;

    /// First parameter (P1)
    fn p1(&self) -> u8;

    /// Second parameter (P2)
    fn p2(&self) -> u8;

    /// Command payload data (optional)
    ///
    /// Short APDUs carry at most [`MAX_DATA_LEN`] bytes here.
    fn data(&self) -> Option<&[u8]>;

    /// Expected response length (optional)
    fn expected_length(&self) -> Option<ExpectedLength>;

    /// Convert to raw APDU bytes
    ///
    /// # Errors
    /// Returns [`Error::DataTooLong`] when the data field does not fit a
    /// one-byte Lc.
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let mut buffer = BytesMut::with_capacity(self.command_length());

        // Header: CLA, INS, P1, P2
        buffer.put_u8(self.class());
        buffer.put_u8(self.instruction());
        buffer.put_u8(self.p1());
        buffer.put_u8(self.p2());

        if let Some(data) = self.data() {
            let lc = u8::try_from(data.len()).map_err(|_| Error::DataTooLong(data.len()))?;
            buffer.put_u8(lc);
            buffer.put_slice(data);
        }

        if let Some(le) = self.expected_length() {
            buffer.put_u8(le);
        }

        Ok(buffer.freeze())
    }

    /// Calculate length of serialized command
    fn command_length(&self) -> usize {
        HEADER_LEN
            + self.data().map_or(0, |data| 1 + data.len())
            + usize::from(self.expected_length().is_some())
    }

    /// Convert to a generic Command
    fn to_command(&self) -> Command {
        Command {
            cla: self.class(),
            ins: self.instruction(),
            p1: self.p1(),
            p2: self.p2(),
            data: self.data().map(Bytes::copy_from_slice),
            le: self.expected_length(),
        }
    }
}

/// Generic APDU command structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
    /// Command data (optional)
    pub data: Option<Bytes>,
    /// Expected length (optional)
    pub le: Option<ExpectedLength>,
}

impl Command {
    /// Create a new command with just the header bytes
    pub const fn new(cla: u8, ins: u8, p1: u8, p2: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: None,
        }
    }

    /// Set the data field
    pub fn with_data<T: Into<Bytes>>(mut self, data: T) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the expected length field
    pub const fn with_le(mut self, le: ExpectedLength) -> Self {
        self.le = Some(le);
        self
    }
}

impl ApduCommand for Command {
    fn class(&self) -> u8 {
        self.cla
    }

    fn instruction(&self) -> u8 {
        self.ins
    }

    fn p1(&self) -> u8 {
        self.p1
    }

    fn p2(&self) -> u8 {
        self.p2
    }

    fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        self.le
    }
}

/// The four mandatory header bytes of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
}

/// Borrowed, positional view over raw command bytes
///
/// Every accessor is bounds-checked and returns `None` when the frame is too
/// short; nothing here allocates or panics, whatever the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCommand<'a> {
    bytes: &'a [u8],
}

impl<'a> RawCommand<'a> {
    /// Wrap raw command bytes
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Header bytes, if the frame has at least four bytes
    pub fn header(&self) -> Option<Header> {
        match *self.bytes {
            [cla, ins, p1, p2, ..] => Some(Header { cla, ins, p1, p2 }),
            _ => None,
        }
    }

    /// Lc byte, if present
    pub fn lc(&self) -> Option<u8> {
        self.bytes.get(LC_OFFSET).copied()
    }

    /// The Lc-bounded data field
    ///
    /// Returns `None` when Lc is missing or claims more bytes than the frame
    /// carries. Bytes after the data field (such as Le) are not included.
    pub fn data(&self) -> Option<&'a [u8]> {
        let lc = usize::from(self.lc()?);
        self.bytes.get(DATA_OFFSET..DATA_OFFSET + lc)
    }
}
