//! Archives transfer client state layer
//!
//! The stores in this crate own all observable client state: the draft being
//! submitted, the admin accession browser, the current user and the shared
//! error banner. Views dispatch intents to a store; stores call the gateway
//! ports from `xfer-core` and turn the results into state changes.

pub mod auth_gate;
pub mod deps;
pub mod error_channel;
pub mod sequence;
pub mod state;
pub mod stores;

pub use auth_gate::{AdminEntry, AuthGate};
pub use deps::AppDeps;
pub use error_channel::ErrorChannel;
pub use sequence::FetchOutcome;
pub use state::AppState;
pub use stores::{AdminStore, SessionStore, SubmissionStore};
