//! Transport traits for APDU communication with cards
//!
//! This module provides the reader-side abstraction for exchanging raw frames
//! with a card, whether physical or emulated in-process.

pub mod error;

use std::fmt;

use bytes::Bytes;
pub use error::TransportError;
use tracing::{debug, trace};

use crate::command::ApduCommand;
use crate::error::{Error, ResultExt};
use crate::response::Response;

/// Trait for basic card transports
///
/// A transport is responsible for sending and receiving raw APDU bytes.
/// It has no knowledge of command structure or protocol details.
pub trait CardTransport: Send + Sync + fmt::Debug {
    /// Error type returned by the transport
    type Error: Into<Error> + fmt::Debug;

    /// Send raw APDU bytes to card and return response bytes
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Self::Error> {
        trace!(command = %hex::encode_upper(command), "Transmitting raw command");
        let result = self.do_transmit_raw(command);
        match &result {
            Ok(response) => {
                trace!(response = %hex::encode_upper(response), "Received raw response");
            }
            Err(e) => {
                debug!(error = ?e, "Transport error during transmission");
            }
        }
        result
    }

    /// Internal implementation of transmit_raw
    /// This is the method that concrete implementations should override
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Self::Error>;

    /// Serialize a command, send it, and parse the reply
    fn transmit<C>(&mut self, command: &C) -> Result<Response, Error>
    where
        C: ApduCommand + ?Sized,
        Self: Sized,
    {
        let command = command.to_bytes()?;
        let response = self.transmit_raw(&command).context("Transport error")?;
        Response::from_bytes(&response).context("Failed to parse response bytes")
    }

    /// Check if the transport is connected to a card
    fn is_connected(&self) -> bool;

    /// Reset the transport connection
    fn reset(&mut self) -> Result<(), Self::Error>;
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct MockTransport {
    pub(crate) responses: Vec<Bytes>,
    pub(crate) commands: Vec<Bytes>,
    pub(crate) connected: bool,
}

#[cfg(test)]
impl MockTransport {
    pub(crate) fn new(responses: Vec<Bytes>) -> Self {
        Self {
            responses,
            commands: Vec::new(),
            connected: true,
        }
    }
}

#[cfg(test)]
impl CardTransport for MockTransport {
    type Error = TransportError;

    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Self::Error> {
        if !self.connected {
            return Err(TransportError::Connection);
        }

        self.commands.push(Bytes::copy_from_slice(command));

        if self.responses.is_empty() {
            return Err(TransportError::Transmission);
        }
        Ok(self.responses.remove(0))
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.connected = true;
        self.commands.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::response::status::Status;

    #[test]
    fn test_transmit_parses_reply() {
        let mut transport = MockTransport::new(vec![Bytes::from_static(&[0xAA, 0x90, 0x00])]);
        let response = transport
            .transmit(&Command::new(0x80, 0x10, 0x00, 0x00))
            .unwrap();

        assert_eq!(transport.commands, vec![Bytes::from_static(&[0x80, 0x10, 0x00, 0x00])]);
        assert_eq!(response.payload().unwrap().as_ref(), &[0xAA]);
        assert_eq!(response.status(), Status::Success.word());
    }

    #[test]
    fn test_transmit_reports_short_reply() {
        let mut transport = MockTransport::new(vec![Bytes::from_static(&[0x90])]);
        let err = transport
            .transmit(&Command::new(0x80, 0x10, 0x00, 0x00))
            .unwrap_err();
        assert!(matches!(err, Error::Context { .. }));
    }

    #[test]
    fn test_transmit_disconnected() {
        let mut transport = MockTransport::new(Vec::new());
        transport.connected = false;
        let err = transport
            .transmit(&Command::new(0x00, 0xA4, 0x04, 0x00))
            .unwrap_err();
        assert_eq!(
            err,
            Error::Transport(TransportError::Connection).with_context("Transport error")
        );

        transport.reset().unwrap();
        assert!(transport.is_connected());
    }
}
