use async_trait::async_trait;
use xfer_core::admin::{NewNote, PageQuery};
use xfer_core::ports::{AdminAccessionPort, GatewayResult};
use xfer_core::{AccessionDetail, AccessionId, AccessionsPage, Note};

use super::HttpGateway;

#[async_trait]
impl AdminAccessionPort for HttpGateway {
    async fn list_accessions(&self, query: &PageQuery) -> GatewayResult<AccessionsPage> {
        let mut url = self.endpoint(&["api", "admin", "accessions"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            if let Some(q) = query.query.as_deref().filter(|q| !q.is_empty()) {
                pairs.append_pair("q", q);
            }
            if let Some(g) = query.genre.as_deref().filter(|g| !g.is_empty()) {
                pairs.append_pair("g", g);
            }
        }
        Self::json(self.as_admin(self.client.get(url))).await
    }

    async fn accession_detail(&self, id: AccessionId) -> GatewayResult<AccessionDetail> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "admin", "accessions", &id]);
        Self::json(self.as_admin(self.client.get(url))).await
    }

    async fn accession_notes(&self, id: AccessionId) -> GatewayResult<Vec<Note>> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "admin", "accessions", &id, "notes"]);
        Self::json(self.as_admin(self.client.get(url))).await
    }

    async fn add_note(&self, id: AccessionId, note: &NewNote) -> GatewayResult<Note> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "admin", "accessions", &id, "notes"]);
        Self::json(self.as_admin(self.client.post(url)).json(note)).await
    }
}
