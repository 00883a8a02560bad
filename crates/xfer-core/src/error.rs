//! Local validation failures.
//!
//! Remote failures are described by [`GatewayError`](crate::ports::GatewayError);
//! everything here is detected before any network call is made and fails the
//! store operation that was asked to perform it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown field path: {0}")]
    UnknownFieldPath(String),

    #[error("invalid value for {path}: {reason}")]
    InvalidFieldValue { path: String, reason: String },

    #[error("index {index} is out of range for {len} inventory rows")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no uploaded file named {0}")]
    UnknownFile(String),

    #[error("a file named {0} has already been uploaded")]
    DuplicateFile(String),

    #[error("no submission identifier has been allocated")]
    MissingIdentifier,

    #[error("uploaded files are still attached to the current submission identifier")]
    UploadsAttached,

    #[error("no authenticated user")]
    NotAuthenticated,

    #[error("no user is associated with this session")]
    MissingUser,

    #[error("no accession is loaded")]
    NoAccessionLoaded,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("a note is already being saved")]
    Busy,
}
