//! HTTP gateway to the transfer service.
//! 传输服务的 HTTP 网关。
//!
//! One request per call: no retries, no caching. Transport failures map to
//! [`GatewayError::Unreachable`], any non-2xx status (and any success body
//! that does not decode) to [`GatewayError::ServerError`].

mod account;
mod admin;
mod reference;
mod submission;

use std::sync::{Mutex, PoisonError};

use anyhow::Context;
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use xfer_core::ports::{AdminSessionPort, GatewayError, GatewayResult};
use xfer_core::AppConfig;

/// Cookie carrying the admin API session on admin calls.
pub const ADMIN_SESSION_COOKIE: &str = "archives_xfer_api_session";

pub struct HttpGateway {
    client: Client,
    base: Url,
    admin_session: Mutex<Option<String>>,
}

impl HttpGateway {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Self::with_client(client, &config.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid server base url: {base_url}"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Server base url cannot carry paths: {base_url}");
        }
        Ok(Self {
            client,
            base,
            admin_session: Mutex::new(None),
        })
    }

    /// `{base}/seg/seg/...`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn admin_session(&self) -> Option<String> {
        self.admin_session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Attach the admin session cookie when one is known.
    fn as_admin(&self, request: RequestBuilder) -> RequestBuilder {
        match self.admin_session() {
            Some(session) => request.header(COOKIE, format!("{ADMIN_SESSION_COOKIE}={session}")),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> GatewayResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "gateway response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::ServerError {
            status: status.as_u16(),
            body,
        })
    }

    async fn text(request: RequestBuilder) -> GatewayResult<(u16, String)> {
        let response = Self::send(request).await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;
        Ok((status, body))
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> GatewayResult<T> {
        let (status, body) = Self::text(request).await?;
        serde_json::from_str(&body).map_err(|e| GatewayError::ServerError {
            status,
            body: format!("invalid response body: {e}"),
        })
    }
}

impl AdminSessionPort for HttpGateway {
    fn set_admin_session(&self, session: Option<String>) {
        *self
            .admin_session
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = session;
    }

    fn has_admin_session(&self) -> bool {
        self.admin_session().is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::time::Duration;

    pub(crate) fn gateway(base_url: &str) -> HttpGateway {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpGateway::with_client(client, base_url).unwrap()
    }

    #[test]
    fn endpoint_encodes_segments_and_keeps_base_path() {
        let gw = gateway("http://example.com/xfer/");
        assert_eq!(
            gw.endpoint(&["api", "upload", "my scan.pdf"]).as_str(),
            "http://example.com/xfer/api/upload/my%20scan.pdf"
        );

        let gw = gateway("http://example.com");
        assert_eq!(gw.endpoint(&["api", "genres"]).as_str(), "http://example.com/api/genres");
    }

    #[test]
    fn rejects_unusable_base_url() {
        let client = Client::new();
        assert!(HttpGateway::with_client(client.clone(), "not a url").is_err());
        assert!(HttpGateway::with_client(client, "mailto:archives@example.edu").is_err());
    }

    #[test]
    fn admin_session_round_trip() {
        let gw = gateway("http://example.com");
        assert!(!gw.has_admin_session());
        gw.set_admin_session(Some("tok|ada@example.edu".into()));
        assert!(gw.has_admin_session());
        gw.set_admin_session(None);
        assert!(!gw.has_admin_session());
    }

    #[tokio::test]
    async fn connection_failure_is_unreachable() {
        // Nothing listens on port 1.
        let gw = gateway("http://127.0.0.1:1");
        let err = HttpGateway::send(gw.client.get(gw.endpoint(&["api", "genres"])))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unreachable(_)));
    }
}
