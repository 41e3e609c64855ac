//! In-process transport that talks straight to an emulated card
//!
//! Lets reader-side code drive a [`CardService`] exactly as it would a card
//! behind a PC/SC reader, without any NFC hardware.

use std::sync::Arc;

use bytes::Bytes;
use layr_apdu_core::{CardTransport, TransportError};
use tracing::debug;

use crate::service::{CardService, DeactivationReason};

/// Loopback transport wrapping a card service
#[derive(Debug, Clone)]
pub struct EmulatedTransport<S: ?Sized> {
    service: Arc<S>,
    connected: bool,
}

impl<S: CardService + ?Sized> EmulatedTransport<S> {
    /// Put the reader in the field of `service`
    pub const fn new(service: Arc<S>) -> Self {
        Self {
            service,
            connected: true,
        }
    }

    /// The card behind this transport
    pub const fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Drop the link, as if the phone left the field
    pub fn disconnect(&mut self) {
        if self.connected {
            self.connected = false;
            self.service.on_deactivated(DeactivationReason::LinkLoss);
        }
    }
}

impl<S: CardService + ?Sized> CardTransport for EmulatedTransport<S> {
    type Error = TransportError;

    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Self::Error> {
        if !self.connected {
            return Err(TransportError::Connection);
        }
        Ok(self.service.process_apdu(command))
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        debug!(aid = %self.service.aid(), "Resetting emulated link");
        self.service.on_deactivated(DeactivationReason::Deselected);
        self.connected = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applet::LayrApplet;
    use crate::event::Event;

    #[test]
    fn test_transmit_reaches_applet() {
        let applet = Arc::new(LayrApplet::default());
        let mut transport = EmulatedTransport::new(Arc::clone(&applet));

        let reply = transport.transmit_raw(&[0x80, 0x10, 0x00, 0x00]).unwrap();
        assert_eq!(reply.len(), 18);
        assert_eq!(applet.events().get(), Event::AuthInit);
    }

    #[test]
    fn test_disconnect_deactivates() {
        let applet = Arc::new(LayrApplet::default());
        let mut transport = EmulatedTransport::new(Arc::clone(&applet));

        transport.disconnect();
        assert!(!transport.is_connected());
        assert_eq!(applet.events().get(), Event::Deactivated);
        assert_eq!(
            transport.transmit_raw(&[0x80, 0x10, 0x00, 0x00]),
            Err(TransportError::Connection)
        );

        transport.reset().unwrap();
        assert!(transport.is_connected());
        assert!(transport.transmit_raw(&[0x80, 0x10, 0x00, 0x00]).is_ok());
    }

    #[test]
    fn test_dyn_service() {
        let service: Arc<dyn CardService> = Arc::new(LayrApplet::default());
        let mut transport = EmulatedTransport::new(service);
        let reply = transport.transmit_raw(&[0x00]).unwrap();
        assert_eq!(reply.as_ref(), &[0x6D, 0x00]);
    }
}
