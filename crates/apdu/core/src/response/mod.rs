//! APDU response definitions
//!
//! A response is an optional payload followed by exactly one status word.
//! Encoding goes through `From<Response> for Bytes`; the reader side parses
//! raw bytes back with [`Response::from_bytes`].

pub mod error;
pub mod status;
pub mod utils;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use error::ResponseError;
use status::{Status, StatusWord};

/// Basic APDU response structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Response payload data
    payload: Option<Bytes>,
    /// Status word
    status: StatusWord,
}

impl Response {
    /// Create a new response with payload and status
    pub fn new(payload: Option<Bytes>, status: impl Into<StatusWord>) -> Self {
        Self {
            payload: payload.filter(|p| !p.is_empty()),
            status: status.into(),
        }
    }

    /// Create a success response
    pub fn success(payload: Option<Bytes>) -> Self {
        Self::new(payload, Status::Success)
    }

    /// Create a status-only response
    pub fn error(status: impl Into<StatusWord>) -> Self {
        Self {
            payload: None,
            status: status.into(),
        }
    }

    /// Parse response from raw bytes (including status word)
    pub fn from_bytes(data: &[u8]) -> Result<Self, ResponseError> {
        let (status, payload) = utils::extract_status_and_payload(data)?;

        trace!(
            sw1 = format_args!("{:#04x}", status.sw1),
            sw2 = format_args!("{:#04x}", status.sw2),
            payload_len = payload.len(),
            "Parsed APDU response"
        );

        Ok(Self::new(Some(Bytes::copy_from_slice(payload)), status))
    }

    /// Get the response payload data
    pub const fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }

    /// Get the status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// Check if the response indicates success
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Number of bytes this response occupies on the wire
    pub fn encoded_len(&self) -> usize {
        self.payload.as_ref().map_or(0, Bytes::len) + 2
    }

}

impl From<Status> for Response {
    fn from(status: Status) -> Self {
        Self::error(status)
    }
}

impl From<Response> for Bytes {
    fn from(response: Response) -> Self {
        let mut buf = BytesMut::with_capacity(response.encoded_len());
        if let Some(payload) = response.payload {
            buf.put_slice(&payload);
        }
        buf.put_u8(response.status.sw1);
        buf.put_u8(response.status.sw2);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_creation() {
        let data = Some(Bytes::from_static(&[0x01, 0x02, 0x03][..]));
        let resp = Response::new(data, (0x90, 0x00));
        assert_eq!(
            resp.payload(),
            Some(&Bytes::from_static(&[0x01, 0x02, 0x03]))
        );
        assert_eq!(resp.status(), StatusWord::new(0x90, 0x00));
        assert!(resp.is_success());
        assert_eq!(resp.encoded_len(), 5);
    }

    #[test]
    fn test_empty_payload_is_none() {
        let resp = Response::success(Some(Bytes::new()));
        assert!(resp.payload().is_none());
        assert_eq!(Bytes::from(resp).as_ref(), &[0x90, 0x00]);
    }

    #[test]
    fn test_response_from_bytes() {
        let data = hex::decode("0102039000").unwrap();
        let resp = Response::from_bytes(&data).unwrap();
        assert_eq!(resp.payload().unwrap().as_ref(), &[0x01, 0x02, 0x03]);
        assert!(resp.is_success());

        let resp = Response::from_bytes(&[0x6D, 0x00]).unwrap();
        assert!(resp.payload().is_none());
        assert_eq!(resp.status(), Status::InsNotSupported.word());

        assert!(Response::from_bytes(&[0x01]).is_err());
    }

    #[test]
    fn test_status_only_encoding() {
        let encoded: Bytes = Response::from(Status::ClaNotSupported).into();
        assert_eq!(hex::encode_upper(&encoded), "6E00");
    }
}
