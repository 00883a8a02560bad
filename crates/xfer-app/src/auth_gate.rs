//! Entry check for the admin pages.
//!
//! The service authenticates behind an external sign-on front. A page entered
//! without a session is sent to `{base}/authenticate?page={path}`; when the
//! browser comes back the credential left by that exchange is consumed here.

use std::sync::Arc;

use tracing::{debug, info};
use url::Url;
use xfer_core::ports::{AdminSessionPort, SessionCredentialPort};

use crate::stores::session::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminEntry {
    Proceed,
    Redirect(Url),
}

pub struct AuthGate {
    session: Arc<SessionStore>,
    credentials: Arc<dyn SessionCredentialPort>,
    admin_session: Arc<dyn AdminSessionPort>,
    authenticate_url: Url,
}

impl AuthGate {
    pub fn new(
        session: Arc<SessionStore>,
        credentials: Arc<dyn SessionCredentialPort>,
        admin_session: Arc<dyn AdminSessionPort>,
        authenticate_url: Url,
    ) -> Self {
        Self {
            session,
            credentials,
            admin_session,
            authenticate_url,
        }
    }

    /// Decide whether an admin page may be shown.
    ///
    /// An authenticated user proceeds. Otherwise a pending credential is
    /// consumed (user stored, admin session handed to the gateway) and the
    /// user proceeds. With neither, the caller must redirect.
    #[tracing::instrument(name = "store.auth.enter_admin", skip(self))]
    pub async fn enter_admin(&self, requested_path: &str) -> anyhow::Result<AdminEntry> {
        if self.session.is_authenticated().await {
            return Ok(AdminEntry::Proceed);
        }

        if let Some(credential) = self.credentials.take().await? {
            let mut user = credential.user;
            user.authenticated = true;
            info!(email = %user.email, admin = credential.admin_session.is_some(), "session credential consumed");
            self.admin_session.set_admin_session(credential.admin_session);
            self.session.set_user(user).await;
            return Ok(AdminEntry::Proceed);
        }

        let target = self.redirect_url(requested_path);
        debug!(target = %target, "no session, redirecting to authenticate");
        Ok(AdminEntry::Redirect(target))
    }

    /// `{authenticate_url}?page={path}` with the leading slash dropped.
    pub fn redirect_url(&self, requested_path: &str) -> Url {
        let mut url = self.authenticate_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("page", requested_path.trim_start_matches('/'));
        url
    }

    pub async fn logout(&self) {
        self.session.clear_user().await;
        self.admin_session.set_admin_session(None);
        info!("logged out");
    }
}
