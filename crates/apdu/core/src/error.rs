//! Core error type for APDU operations
//!
//! The card side never surfaces these: malformed commands degrade to status
//! words there. They are for reader-side parsing and transports.

use crate::response::error::ResponseError;
use crate::transport::TransportError;

/// Core error type that encompasses all possible errors in the crate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Command data does not fit the one-byte Lc of a short APDU
    #[error("Command data is {0} bytes long, at most 255 fit a short APDU")]
    DataTooLong(usize),

    /// Response could not be parsed
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Transport failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Context error with message and source error
    #[error("{context}: {source}")]
    Context {
        /// Contextual message
        context: String,
        /// Source error
        source: Box<Self>,
    },
}

impl Error {
    /// Create a new error with context information
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type for APDU operations
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Extension trait for Result with APDU Errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, context: S) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for core::result::Result<T, E> {
    fn context<S: Into<String>>(self, context: S) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
