//! # xfer-core
//!
//! Core domain models and port contracts for the archives transfer client.
//!
//! This crate contains pure data and rules without any infrastructure
//! dependencies: the draft accession, reference data, admin records and
//! their page window, the user identity, and the traits the stores use to
//! reach the transfer service.

pub mod admin;
pub mod config;
pub mod draft;
pub mod error;
pub mod ids;
pub mod ports;
pub mod reference;
pub mod submission;
pub mod user;

// Re-export commonly used types at the crate root
pub use admin::{AccessionDetail, AccessionSummary, AccessionsPage, Note, PageMove, PageWindow};
pub use config::AppConfig;
pub use draft::{Draft, DraftField, FileRef, InventoryRow};
pub use error::ValidationError;
pub use ids::{AccessionId, NoteId, SubmissionId, UserId, VocabId};
pub use ports::GatewayError;
pub use reference::ReferenceData;
pub use user::User;
