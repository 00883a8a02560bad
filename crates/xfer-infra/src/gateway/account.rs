use async_trait::async_trait;
use xfer_core::ports::{AccountPort, GatewayResult};
use xfer_core::user::NewUser;
use xfer_core::User;

use super::HttpGateway;

#[async_trait]
impl AccountPort for HttpGateway {
    async fn lookup_user(&self, email: &str) -> GatewayResult<User> {
        let mut url = self.endpoint(&["api", "users", "lookup"]);
        url.query_pairs_mut().append_pair("email", email);
        Self::json(self.client.get(url)).await
    }

    async fn register_user(&self, user: &NewUser) -> GatewayResult<User> {
        Self::json(self.client.post(self.endpoint(&["api", "users"])).json(user)).await
    }

    async fn verify_user(&self, token: &str) -> GatewayResult<User> {
        Self::json(self.client.post(self.endpoint(&["api", "verify", token]))).await
    }

    async fn resend_verification(&self, token: &str) -> GatewayResult<()> {
        let url = self.endpoint(&["api", "resend", "verification"]);
        let body = serde_json::json!({ "token": token });
        Self::text(self.client.post(url).json(&body)).await.map(|_| ())
    }
}
