use crate::{abstract_trait::AuthClientTrait, errors::ServiceError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

/// Calls the backend's logout endpoint with the session's bearer token.
pub struct HttpAuthClient {
    client: Client,
    base_url: String,
}

impl HttpAuthClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn logout_url(&self) -> String {
        format!("{}/auth/logout", self.base_url)
    }
}

#[async_trait]
impl AuthClientTrait for HttpAuthClient {
    async fn invalidate_session(&self, token: &str) -> Result<(), ServiceError> {
        let url = self.logout_url();
        info!("Invalidating remote session: {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .send()
            .await
            .inspect_err(|e| error!("Logout request to {url} failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            error!("Logout request to {url} returned {status}");
            return Err(ServiceError::UnexpectedStatus(status.as_u16()));
        }

        info!("Remote session invalidated");
        Ok(())
    }
}
