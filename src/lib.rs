//! Archives transfer client shell: bootstrap and wiring around the
//! `xfer-app` stores.

pub mod bootstrap;

pub use bootstrap::{build_app_state, init_tracing_subscriber, resolve_config_path};
