//! Contract between the emulated card and the host's card-emulation framework
//!
//! The host owns the NFC link. It calls [`CardService::process_apdu`] once per
//! received command frame and sends the returned bytes back verbatim, and it
//! calls [`CardService::on_deactivated`] when the link is lost or another
//! service is selected. Command frames that should change the observer's
//! label come out of [`crate::dispatch`] alongside their response.

use std::fmt;

use bytes::Bytes;
use derive_more::Display;

use crate::aid::Aid;
use crate::event::Event;

/// Why the host tore down the emulation session
///
/// Mirrors the integer codes used by Android's `HostApduService`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DeactivationReason {
    /// The NFC field or link was lost
    #[display("link loss")]
    LinkLoss,
    /// The reader selected a different AID
    #[display("deselected")]
    Deselected,
    /// Any other code reported by the host
    #[display("unknown ({_0})")]
    Other(i32),
}

impl From<i32> for DeactivationReason {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::LinkLoss,
            1 => Self::Deselected,
            other => Self::Other(other),
        }
    }
}

impl From<DeactivationReason> for i32 {
    fn from(reason: DeactivationReason) -> Self {
        match reason {
            DeactivationReason::LinkLoss => 0,
            DeactivationReason::Deselected => 1,
            DeactivationReason::Other(code) => code,
        }
    }
}

/// A card application the host can route APDUs to
pub trait CardService: Send + Sync + fmt::Debug {
    /// The application identifier the host registers this service under
    fn aid(&self) -> &Aid;

    /// Handle one command frame and return the complete response frame
    ///
    /// Must never fail: malformed input is answered with a status word.
    fn process_apdu(&self, command: &[u8]) -> Bytes;

    /// Notification that the reader link is gone
    ///
    /// Returns the event recorded for the observer.
    fn on_deactivated(&self, reason: DeactivationReason) -> Event;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        assert_eq!(DeactivationReason::from(0), DeactivationReason::LinkLoss);
        assert_eq!(DeactivationReason::from(1), DeactivationReason::Deselected);
        assert_eq!(DeactivationReason::from(-7), DeactivationReason::Other(-7));
        assert_eq!(i32::from(DeactivationReason::Deselected), 1);
        assert_eq!(DeactivationReason::Other(42).to_string(), "unknown (42)");
    }
}
