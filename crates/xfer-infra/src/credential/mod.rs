//! Sources of the session credential left by the authentication exchange.

mod file;
mod memory;

pub use file::FileCredentialSource;
pub use memory::InMemoryCredentialSource;

/// Cookie holding the query-escaped user JSON.
pub const USER_COOKIE: &str = "archives_xfer_user";
