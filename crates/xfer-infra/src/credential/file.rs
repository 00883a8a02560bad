//! Credential dropped on disk by the authentication callback.
//!
//! The file is a JSON object holding the two cookies exactly as the service
//! set them:
//!
//! ```json
//! {
//!   "archives_xfer_user": "%7B%22firstName%22%3A%22Ada%22...%7D",
//!   "archives_xfer_api_session": "token|ada@virginia.edu"
//! }
//! ```
//!
//! The user cookie is query-escaped JSON; plain JSON is accepted as well.
//! The file is deleted once read.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, info};
use url::form_urlencoded;
use xfer_core::ports::{SessionCredential, SessionCredentialPort};
use xfer_core::User;

use super::USER_COOKIE;
use crate::gateway::ADMIN_SESSION_COOKIE;

pub struct FileCredentialSource {
    path: PathBuf,
}

impl FileCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn decode_user(raw: &str) -> anyhow::Result<User> {
    let raw = raw.trim();
    let json = if raw.starts_with('{') {
        raw.to_string()
    } else {
        form_urlencoded::parse(raw.as_bytes())
            .next()
            .map(|(decoded, _)| decoded.into_owned())
            .unwrap_or_default()
    };
    serde_json::from_str(&json).context("Failed to decode user cookie")
}

#[async_trait]
impl SessionCredentialPort for FileCredentialSource {
    async fn take(&self) -> anyhow::Result<Option<SessionCredential>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no pending credential");
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read credential file: {}", self.path.display())
                })
            }
        };
        tokio::fs::remove_file(&self.path)
            .await
            .with_context(|| format!("Failed to erase credential file: {}", self.path.display()))?;

        let cookies: HashMap<String, String> =
            serde_json::from_str(&content).context("Failed to parse credential file")?;
        let user = cookies
            .get(USER_COOKIE)
            .map(|raw| decode_user(raw))
            .transpose()?
            .ok_or_else(|| anyhow::anyhow!("Credential file has no {USER_COOKIE} entry"))?;
        let admin_session = cookies
            .get(ADMIN_SESSION_COOKIE)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        info!(email = %user.email, admin = admin_session.is_some(), "credential taken from file");
        Ok(Some(SessionCredential {
            user,
            admin_session,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_escaped_cookie_and_erases_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credential.json");
        let escaped: String = form_urlencoded::byte_serialize(
            br#"{"id":3,"firstName":"Ada","email":"ada@virginia.edu","title":"Head Archivist"}"#,
        )
        .collect();
        let content = serde_json::json!({
            "archives_xfer_user": escaped,
            "archives_xfer_api_session": "tok|ada@virginia.edu"
        });
        std::fs::write(&path, content.to_string()).unwrap();

        let source = FileCredentialSource::new(&path);
        let credential = source.take().await.unwrap().unwrap();

        assert_eq!(credential.user.first_name, "Ada");
        assert_eq!(credential.user.title, "Head Archivist");
        assert_eq!(credential.admin_session.as_deref(), Some("tok|ada@virginia.edu"));
        assert!(!path.exists());
        assert!(source.take().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn plain_json_user_without_admin_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credential.json");
        let content = serde_json::json!({
            "archives_xfer_user": r#"{"firstName":"Lou","email":"lr@example.edu"}"#
        });
        std::fs::write(&path, content.to_string()).unwrap();

        let credential = FileCredentialSource::new(&path).take().await.unwrap().unwrap();

        assert_eq!(credential.user.email, "lr@example.edu");
        assert!(credential.admin_session.is_none());
    }

    #[tokio::test]
    async fn missing_user_entry_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credential.json");
        std::fs::write(&path, r#"{"archives_xfer_api_session":"tok|x"}"#).unwrap();

        let err = FileCredentialSource::new(&path).take().await.unwrap_err();

        assert!(err.to_string().contains("archives_xfer_user"));
    }
}
