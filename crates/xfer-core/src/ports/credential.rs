//! Authentication redirect boundary.
//!
//! The transfer service authenticates behind an external single sign-on
//! front. After the redirect back, it leaves a transient credential for the
//! client: the user record and, for admin pages, an API session token. How it
//! is delivered is the adapter's business; the contract is only that it can
//! be taken exactly once.

use async_trait::async_trait;

use crate::user::User;

/// What the authentication exchange left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredential {
    pub user: User,
    /// Opaque admin API session (`token|email`), sent back as a cookie on
    /// admin calls. Absent for submit-only logins.
    pub admin_session: Option<String>,
}

#[async_trait]
pub trait SessionCredentialPort: Send + Sync {
    /// Consume the pending credential, erasing it locally.
    ///
    /// Returns `Ok(None)` when nothing is pending. A second call after a
    /// successful take must return `Ok(None)`.
    async fn take(&self) -> anyhow::Result<Option<SessionCredential>>;
}

/// Receives the admin API session so admin calls can present it.
pub trait AdminSessionPort: Send + Sync {
    fn set_admin_session(&self, session: Option<String>);

    fn has_admin_session(&self) -> bool;
}
