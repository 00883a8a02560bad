pub mod admin;
pub mod session;
pub mod submission;

pub use admin::{AdminStore, PageFilter};
pub use session::{LookupOutcome, SessionStore};
pub use submission::{PendingDelete, ReferenceLoadReport, SubmissionStore};
