//! Port interfaces for the store layer
//!
//! Ports define the contract between the stores in `xfer-app` and the
//! infrastructure that talks to the transfer service. Stores only ever see
//! these traits, so tests can swap in fakes and no store depends on HTTP.

pub mod credential;
pub mod gateway;

pub use credential::{AdminSessionPort, SessionCredential, SessionCredentialPort};
pub use gateway::{
    AccountPort, AdminAccessionPort, GatewayError, GatewayResult, ReferenceDataPort,
    SubmissionPort,
};
