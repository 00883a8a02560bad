//! Infrastructure adapters for the archives transfer client
//!
//! - [`gateway::HttpGateway`]: every gateway port over HTTP
//! - [`credential`]: sources of the post-authentication session credential
//! - [`config::load_config`]: TOML file → `AppConfig`

pub mod config;
pub mod credential;
pub mod gateway;

pub use config::load_config;
pub use credential::{FileCredentialSource, InMemoryCredentialSource};
pub use gateway::HttpGateway;
