//! Reader-side commands understood by the LAYR applet

use layr_apdu_core::{ApduCommand, ExpectedLength};

use crate::aid::Aid;
use crate::constants::{cla, ins, select_p1, select_p2};

/// SELECT by DF name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectCommand {
    aid: Aid,
}

impl SelectCommand {
    /// Select the given application
    pub const fn new(aid: Aid) -> Self {
        Self { aid }
    }
}

impl ApduCommand for SelectCommand {
    fn class(&self) -> u8 {
        cla::ISO7816
    }

    fn instruction(&self) -> u8 {
        ins::SELECT
    }

    fn p1(&self) -> u8 {
        select_p1::BY_NAME
    }

    fn p2(&self) -> u8 {
        select_p2::FIRST_OR_ONLY
    }

    fn data(&self) -> Option<&[u8]> {
        Some(self.aid.as_bytes())
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }
}

/// AUTH_INIT, answered with the fixed sixteen byte pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthInitCommand;

impl ApduCommand for AuthInitCommand {
    fn class(&self) -> u8 {
        cla::PROPRIETARY
    }

    fn instruction(&self) -> u8 {
        ins::AUTH_INIT
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        0x00
    }

    fn data(&self) -> Option<&[u8]> {
        None
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_encoding() {
        let select = SelectCommand::new(Aid::layr());
        assert_eq!(hex::encode_upper(select.to_bytes().unwrap()), "00A4040006F0BAAAAAAD01");
    }

    #[test]
    fn test_auth_init_encoding() {
        assert_eq!(hex::encode_upper(AuthInitCommand.to_bytes().unwrap()), "80100000");
    }
}
