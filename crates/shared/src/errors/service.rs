use reqwest::Error as ReqwestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] ReqwestError),

    #[error("Unexpected status from auth server: {0}")]
    UnexpectedStatus(u16),

    #[error("Internal error: {0}")]
    Internal(String),
}
