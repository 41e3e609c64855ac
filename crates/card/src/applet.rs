//! The LAYR applet: maps command frames to response frames
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. `00 A4 04 00 Lc <AID>` whose data field equals the configured AID
//!    answers `90 00`. Anything that fails this check falls through.
//! 2. Frames shorter than four bytes answer `6D 00`.
//! 3. A class other than `80` answers `6E 00`.
//! 4. `80 10` (AUTH_INIT) answers sixteen `AA` bytes then `90 00`; any other
//!    instruction answers `6D 00`.

use std::sync::Arc;

use bytes::Bytes;
use layr_apdu_core::{RawCommand, Response, Status};
use tracing::{debug, info, warn};

use crate::aid::Aid;
use crate::constants::{AUTH_INIT_PATTERN, cla, ins, select_p1, select_p2};
use crate::event::{Event, LastEvent};
use crate::service::{CardService, DeactivationReason};

/// Map one command frame to its response
///
/// Pure function of its inputs. The returned event, when present, is what an
/// observer should be told; `None` means the label stays as it was.
pub fn dispatch(command: &[u8], aid: &[u8]) -> (Response, Option<Event>) {
    let command = RawCommand::new(command);

    if is_select_aid(command, aid) {
        return (Response::success(None), Some(Event::Selected));
    }

    let Some(header) = command.header() else {
        return (Status::InsNotSupported.into(), None);
    };

    if header.cla != cla::PROPRIETARY {
        return (Status::ClaNotSupported.into(), None);
    }

    match header.ins {
        ins::AUTH_INIT => (
            Response::success(Some(Bytes::from_static(&AUTH_INIT_PATTERN))),
            Some(Event::AuthInit),
        ),
        _ => (Status::InsNotSupported.into(), None),
    }
}

/// SELECT by name of exactly `aid`
fn is_select_aid(command: RawCommand<'_>, aid: &[u8]) -> bool {
    let Some(header) = command.header() else {
        return false;
    };
    if header.cla != cla::ISO7816
        || header.ins != ins::SELECT
        || header.p1 != select_p1::BY_NAME
        || header.p2 != select_p2::FIRST_OR_ONLY
    {
        return false;
    }

    command.data().is_some_and(|data| data == aid)
}

/// The emulated LAYR card application
#[derive(Debug, Clone)]
pub struct LayrApplet {
    aid: Aid,
    events: Arc<LastEvent>,
}

impl LayrApplet {
    /// Create an applet answering to `aid`
    pub fn new(aid: Aid) -> Self {
        Self::with_events(aid, Arc::new(LastEvent::new()))
    }

    /// Create an applet publishing into an existing event cell
    pub const fn with_events(aid: Aid, events: Arc<LastEvent>) -> Self {
        Self { aid, events }
    }

    /// The shared last-event cell, for handing to an observer
    pub const fn events(&self) -> &Arc<LastEvent> {
        &self.events
    }

    /// Dispatch against this applet's AID without publishing anything
    pub fn dispatch(&self, command: &[u8]) -> (Response, Option<Event>) {
        dispatch(command, &self.aid)
    }
}

impl Default for LayrApplet {
    fn default() -> Self {
        Self::new(Aid::layr())
    }
}

impl CardService for LayrApplet {
    fn aid(&self) -> &Aid {
        &self.aid
    }

    fn process_apdu(&self, command: &[u8]) -> Bytes {
        let (response, event) = self.dispatch(command);

        let status = response.status();
        let level = status.tracing_level();
        if level == tracing::Level::DEBUG {
            debug!(
                command = %hex::encode_upper(command),
                status = %status,
                payload_len = response.encoded_len() - 2,
                "Processed APDU"
            );
        } else {
            warn!(
                command = %hex::encode_upper(command),
                status = %status,
                reason = status.description(),
                "Rejected APDU"
            );
        }

        if let Some(event) = event {
            if event == Event::Selected {
                info!(aid = %self.aid, "Applet selected");
            }
            self.events.publish(event);
        }

        response.into()
    }

    fn on_deactivated(&self, reason: DeactivationReason) -> Event {
        info!(%reason, "Applet deactivated");
        self.events.publish(Event::Deactivated);
        Event::Deactivated
    }
}
