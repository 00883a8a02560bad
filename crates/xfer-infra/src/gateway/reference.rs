use async_trait::async_trait;
use xfer_core::ports::{GatewayResult, ReferenceDataPort};
use xfer_core::reference::{Genre, MediaCarrier, RecordType, TransferMethod};

use super::HttpGateway;

#[async_trait]
impl ReferenceDataPort for HttpGateway {
    async fn genres(&self) -> GatewayResult<Vec<Genre>> {
        Self::json(self.client.get(self.endpoint(&["api", "genres"]))).await
    }

    async fn media_carriers(&self) -> GatewayResult<Vec<MediaCarrier>> {
        Self::json(self.client.get(self.endpoint(&["api", "media-carriers"]))).await
    }

    async fn transfer_methods(&self) -> GatewayResult<Vec<TransferMethod>> {
        Self::json(self.client.get(self.endpoint(&["api", "transfer-methods"]))).await
    }

    async fn record_types(&self) -> GatewayResult<Vec<RecordType>> {
        Self::json(self.client.get(self.endpoint(&["api", "types"]))).await
    }
}
