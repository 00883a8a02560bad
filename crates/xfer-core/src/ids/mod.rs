//! ID type wrappers for type safety.

mod id_macro;
pub mod row_ids;
pub mod submission_id;
pub mod vocab_id;

pub use row_ids::{AccessionId, NoteId, UserId};
pub use submission_id::SubmissionId;
pub use vocab_id::VocabId;
