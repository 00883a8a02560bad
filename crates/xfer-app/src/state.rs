//! The explicitly constructed application state.

use std::sync::Arc;

use anyhow::Context;
use url::Url;
use xfer_core::AppConfig;

use crate::auth_gate::AuthGate;
use crate::deps::AppDeps;
use crate::error_channel::ErrorChannel;
use crate::stores::{AdminStore, SessionStore, SubmissionStore};

/// Every store, wired to one shared error channel and session.
/// 所有 store，共享同一个错误通道与会话。
pub struct AppState {
    pub errors: Arc<ErrorChannel>,
    pub session: Arc<SessionStore>,
    pub submission: Arc<SubmissionStore>,
    pub admin: Arc<AdminStore>,
    pub auth: AuthGate,
}

impl AppState {
    pub fn new(deps: AppDeps, config: &AppConfig) -> anyhow::Result<Self> {
        let raw = format!("{}{}", config.base_url, config.authenticate_path);
        let authenticate_url =
            Url::parse(&raw).with_context(|| format!("invalid authenticate url: {raw}"))?;

        let errors = Arc::new(ErrorChannel::new(config.error_clear_after));
        let session = Arc::new(SessionStore::new(deps.accounts, errors.clone()));
        let submission = Arc::new(SubmissionStore::new(
            deps.reference_data,
            deps.submission,
            session.clone(),
            errors.clone(),
        ));
        let admin = Arc::new(AdminStore::new(deps.admin, session.clone(), errors.clone()));
        let auth = AuthGate::new(
            session.clone(),
            deps.credentials,
            deps.admin_session,
            authenticate_url,
        );

        Ok(Self {
            errors,
            session,
            submission,
            admin,
            auth,
        })
    }
}
