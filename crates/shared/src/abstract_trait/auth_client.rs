use crate::errors::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAuthClient = Arc<dyn AuthClientTrait + Send + Sync>;

#[async_trait]
pub trait AuthClientTrait {
    /// Ends the server-side session that `token` belongs to.
    async fn invalidate_session(&self, token: &str) -> Result<(), ServiceError>;
}
