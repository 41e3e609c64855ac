//! Core types for APDU (Application Protocol Data Unit) exchanges
//!
//! This crate provides the wire-level building blocks shared by the LAYR
//! emulated card and anything that talks to it, following ISO/IEC 7816-4.
//!
//! ## Overview
//!
//! - [`Command`] and [`RawCommand`] for building and reading command frames
//! - [`Response`], [`StatusWord`] and the closed [`Status`] set for replies
//! - [`CardTransport`] for reader-side frame exchange
//! - Error types for reader-side parsing and transport failures
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

pub mod command;
pub mod error;
pub mod response;
pub mod transport;

pub use command::{ApduCommand, Command, ExpectedLength, Header, RawCommand};
pub use error::{Error, Result, ResultExt};
pub use response::Response;
pub use response::error::ResponseError;
pub use response::status::{Status, StatusWord};
pub use transport::{CardTransport, TransportError};

#[cfg(test)]
mod tests {
    use super::*;

    // Test the basic types are re-exported correctly
    #[test]
    fn test_reexports() {
        let cmd = Command::new(0x00, 0xA4, 0x04, 0x00);
        assert_eq!(cmd.class(), 0x00);
        assert_eq!(cmd.instruction(), 0xA4);
        assert_eq!(cmd.p1(), 0x04);
        assert_eq!(cmd.p2(), 0x00);

        let data = Bytes::from_static(&[0x01, 0x02, 0x03]);
        let resp = Response::success(Some(data.clone()));
        assert!(resp.is_success());
        assert_eq!(resp.payload(), Some(&data));
        assert_eq!(resp.status(), StatusWord::new(0x90, 0x00));
        assert_eq!(Status::InsNotSupported.word(), StatusWord::from(0x6D00));
    }
}
