//! Interactive reader session against the emulated card
//!
//! Each input line is either a hex APDU (spaces allowed) or one of a few
//! shortcut words. Responses are written back as upper-case hex followed by
//! the status description.

use std::io::{self, Write};
use std::sync::Arc;

use layr_apdu_core::{ApduCommand, CardTransport, Response};
use layr_card::{AuthInitCommand, CardService, EmulatedTransport, LayrApplet, SelectCommand};
use tracing::debug;

/// One parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    /// Raw command frame
    Apdu(Vec<u8>),
    /// SELECT the configured AID
    Select,
    /// Send AUTH_INIT
    AuthInit,
    /// Drop the link
    Deactivate,
    /// Bring the link back after a deactivation
    Reset,
    /// Print usage
    Help,
    /// End the session
    Quit,
    /// Blank line or comment
    Empty,
}

impl Input {
    pub(crate) fn parse(line: &str) -> Result<Self, hex::FromHexError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Self::Empty);
        }

        Ok(match line.to_lowercase().as_str() {
            "exit" | "quit" | "q" => Self::Quit,
            "help" | "?" => Self::Help,
            "select" => Self::Select,
            "auth" | "auth_init" => Self::AuthInit,
            "deactivate" => Self::Deactivate,
            "reset" => Self::Reset,
            _ => {
                let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
                Self::Apdu(hex::decode(compact)?)
            }
        })
    }
}

pub(crate) const HELP: &str = "\
Commands:
  <hex>       - Send APDU command (e.g. '00A4040006F0BAAAAAAD01')
  select      - SELECT the configured AID
  auth        - Send AUTH_INIT (80 10 00 00)
  deactivate  - Drop the NFC link
  reset       - Reconnect after a deactivation
  help        - Show this help
  exit        - Exit the session";

/// Reader side of a simulated NFC session
#[derive(Debug)]
pub(crate) struct Session {
    transport: EmulatedTransport<LayrApplet>,
}

impl Session {
    pub(crate) const fn new(applet: Arc<LayrApplet>) -> Self {
        Self {
            transport: EmulatedTransport::new(applet),
        }
    }

    /// Handle one input, returning `false` once the session should end
    pub(crate) fn handle<W: Write>(&mut self, input: Input, out: &mut W) -> io::Result<bool> {
        match input {
            Input::Empty => {}
            Input::Quit => return Ok(false),
            Input::Help => writeln!(out, "{HELP}")?,
            Input::Apdu(frame) => self.send(&frame, out)?,
            Input::Select => {
                let select = SelectCommand::new(self.transport.service().aid().clone());
                self.send_command(&select, out)?;
            }
            Input::AuthInit => self.send_command(&AuthInitCommand, out)?,
            Input::Deactivate => {
                self.transport.disconnect();
                writeln!(out, "-- link dropped")?;
            }
            Input::Reset => match self.transport.reset() {
                Ok(()) => writeln!(out, "-- link up")?,
                Err(e) => writeln!(out, "!! reset failed: {e}")?,
            },
        }
        Ok(true)
    }

    fn send_command<C: ApduCommand, W: Write>(
        &mut self,
        command: &C,
        out: &mut W,
    ) -> io::Result<()> {
        match command.to_bytes() {
            Ok(frame) => self.send(&frame, out),
            Err(e) => writeln!(out, "!! {e}"),
        }
    }

    fn send<W: Write>(&mut self, frame: &[u8], out: &mut W) -> io::Result<()> {
        writeln!(out, ">> {}", hex::encode_upper(frame))?;

        let reply = match self.transport.transmit_raw(frame) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "Transmit failed");
                return writeln!(out, "!! {e}");
            }
        };

        match Response::from_bytes(&reply) {
            Ok(response) => writeln!(
                out,
                "<< {} ({})",
                hex::encode_upper(&reply),
                response.status().description()
            ),
            Err(e) => writeln!(out, "<< {} ({e})", hex::encode_upper(&reply)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> String {
        let mut session = Session::new(Arc::new(LayrApplet::default()));
        let mut out = Vec::new();
        for line in lines {
            let input = Input::parse(line).unwrap();
            if !session.handle(input, &mut out).unwrap() {
                break;
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_inputs() {
        assert_eq!(Input::parse("  "), Ok(Input::Empty));
        assert_eq!(Input::parse("# comment"), Ok(Input::Empty));
        assert_eq!(Input::parse("QUIT"), Ok(Input::Quit));
        assert_eq!(Input::parse("select"), Ok(Input::Select));
        assert_eq!(
            Input::parse("80 10 00 00"),
            Ok(Input::Apdu(vec![0x80, 0x10, 0x00, 0x00]))
        );
        assert!(Input::parse("80 1").is_err());
        assert!(Input::parse("zz").is_err());
    }

    #[test]
    fn test_select_and_auth() {
        let output = run(&["select", "auth"]);
        assert!(output.contains(">> 00A4040006F0BAAAAAAD01\n<< 9000 (Success)"));
        assert!(output.contains(&format!("<< {}9000 (Success)", "AA".repeat(16))));
    }

    #[test]
    fn test_rejections() {
        let output = run(&["80FF0000", "00B0", "A0 10 00 00"]);
        assert!(output.contains("<< 6D00 (Instruction code not supported or invalid)"));
        assert!(output.contains("<< 6E00 (Class not supported)"));
    }

    #[test]
    fn test_deactivate_and_reset() {
        let output = run(&["deactivate", "auth", "reset", "auth"]);
        assert!(output.contains("-- link dropped"));
        assert!(output.contains("!! Failed to connect to device"));
        assert!(output.contains("-- link up"));
        assert!(output.contains("9000 (Success)"));
    }

    #[test]
    fn test_quit_stops_processing() {
        let output = run(&["quit", "select"]);
        assert!(output.is_empty());
    }
}
