//! APDU dispatcher for the LAYR host-card-emulation applet
//!
//! The host's card-emulation framework owns the NFC link and hands every
//! command frame to a [`CardService`]; [`LayrApplet`] is the implementation.
//! It understands SELECT of its AID and the proprietary AUTH_INIT instruction,
//! answers everything else with a status word, and records the last thing it
//! did in a [`LastEvent`] cell that an independent observer can poll.
//!
//! ```
//! use layr_card::{CardService, LayrApplet};
//!
//! let applet = LayrApplet::default();
//! let reply = applet.process_apdu(&[0x00, 0xA4, 0x04, 0x00, 0x06, 0xF0, 0xBA, 0xAA, 0xAA, 0xAD, 0x01]);
//! assert_eq!(reply.as_ref(), &[0x90, 0x00]);
//! assert_eq!(applet.events().label(), "SELECT ok");
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod aid;
pub mod applet;
pub mod commands;
pub mod constants;
pub mod event;
pub mod service;
pub mod transport;

pub use aid::{Aid, AidError};
pub use applet::{LayrApplet, dispatch};
pub use commands::{AuthInitCommand, SelectCommand};
pub use event::{Event, LastEvent};
pub use service::{CardService, DeactivationReason};
pub use transport::EmulatedTransport;
