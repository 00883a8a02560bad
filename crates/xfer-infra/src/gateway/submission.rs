use async_trait::async_trait;
use tracing::debug;
use xfer_core::ports::{GatewayError, GatewayResult, SubmissionPort};
use xfer_core::submission::SubmissionPayload;
use xfer_core::SubmissionId;

use super::HttpGateway;

#[async_trait]
impl SubmissionPort for HttpGateway {
    async fn allocate_identifier(&self) -> GatewayResult<SubmissionId> {
        let (status, body) = Self::text(self.client.get(self.endpoint(&["api", "identifier"]))).await?;
        SubmissionId::parse_response(&body).ok_or(GatewayError::ServerError {
            status,
            body: "empty submission identifier".into(),
        })
    }

    async fn delete_upload(&self, filename: &str, key: &SubmissionId) -> GatewayResult<()> {
        let mut url = self.endpoint(&["api", "upload", filename]);
        url.query_pairs_mut().append_pair("key", key.as_str());
        debug!(file = filename, key = %key, "deleting upload");
        Self::send(self.client.delete(url)).await.map(drop)
    }

    async fn submit(&self, payload: &SubmissionPayload) -> GatewayResult<()> {
        Self::send(self.client.post(self.endpoint(&["api", "submit"])).json(payload))
            .await
            .map(drop)
    }
}
