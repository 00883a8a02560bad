use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use xfer_core::ports::{SessionCredential, SessionCredentialPort};

/// Credential handed over in-process, for embedders that receive the
/// authentication callback themselves.
#[derive(Default)]
pub struct InMemoryCredentialSource {
    pending: Mutex<Option<SessionCredential>>,
}

impl InMemoryCredentialSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is pending.
    pub fn put(&self, credential: SessionCredential) {
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential);
    }
}

#[async_trait]
impl SessionCredentialPort for InMemoryCredentialSource {
    async fn take(&self) -> anyhow::Result<Option<SessionCredential>> {
        Ok(self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xfer_core::User;

    #[tokio::test]
    async fn take_consumes_once() {
        let source = InMemoryCredentialSource::new();
        assert!(source.take().await.unwrap().is_none());

        source.put(SessionCredential {
            user: User::email_only("ada@virginia.edu"),
            admin_session: None,
        });

        assert!(source.take().await.unwrap().is_some());
        assert!(source.take().await.unwrap().is_none());
    }
}
