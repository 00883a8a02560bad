//! Process bootstrap: config discovery, tracing, and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::resolve_config_path;
pub use self::tracing::init_tracing_subscriber;
pub use wiring::build_app_state;
