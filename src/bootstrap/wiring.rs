//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on `xfer-infra` and `xfer-app` together. It
//! assembles adapters into [`AppDeps`] and builds the [`AppState`]; it makes
//! no decisions of its own.

use std::sync::Arc;

use tracing::info;
use xfer_app::{AppDeps, AppState};
use xfer_core::ports::SessionCredentialPort;
use xfer_core::AppConfig;
use xfer_infra::{FileCredentialSource, HttpGateway, InMemoryCredentialSource};

pub fn build_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let gateway = Arc::new(HttpGateway::new(config)?);
    let credentials: Arc<dyn SessionCredentialPort> = match &config.credential_path {
        Some(path) => Arc::new(FileCredentialSource::new(path.clone())),
        None => Arc::new(InMemoryCredentialSource::new()),
    };

    let deps = AppDeps {
        reference_data: gateway.clone(),
        submission: gateway.clone(),
        admin: gateway.clone(),
        accounts: gateway.clone(),
        credentials,
        admin_session: gateway,
    };

    info!(base_url = %config.base_url, "application state wired");
    AppState::new(deps, config)
}
