//! Utility functions for APDU response handling

use crate::response::error::ResponseError;
use crate::response::status::StatusWord;
use tracing::debug;

/// Extract status word and payload from raw APDU response data
///
/// The status word is always the trailing two bytes; everything before it
/// is payload (possibly empty).
///
/// # Errors
/// Returns an error if the data is too short to contain a valid status word.
pub fn extract_status_and_payload(data: &[u8]) -> Result<(StatusWord, &[u8]), ResponseError> {
    let Some(split) = data.len().checked_sub(2) else {
        debug!("Response too short: {} bytes", data.len());
        return Err(ResponseError::Incomplete(data.len()));
    };

    let (payload, sw) = data.split_at(split);
    Ok((StatusWord::new(sw[0], sw[1]), payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_status_and_payload() {
        // Payload and status
        let data = [0x01, 0x02, 0x03, 0x90, 0x00];
        let (status, payload) = extract_status_and_payload(&data).unwrap();
        assert_eq!(status, StatusWord::new(0x90, 0x00));
        assert_eq!(payload, &[0x01, 0x02, 0x03]);

        // Only status
        let data = [0x6E, 0x00];
        let (status, payload) = extract_status_and_payload(&data).unwrap();
        assert_eq!(status, StatusWord::new(0x6E, 0x00));
        assert!(payload.is_empty());

        // Insufficient data
        assert_eq!(
            extract_status_and_payload(&[0x90]),
            Err(ResponseError::Incomplete(1))
        );
        assert_eq!(
            extract_status_and_payload(&[]),
            Err(ResponseError::Incomplete(0))
        );
    }
}
