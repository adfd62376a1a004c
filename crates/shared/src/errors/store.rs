use redis::RedisError;
use serde_json::Error as JsonError;
use std::io::Error as IoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("Malformed session file: {0}")]
    Json(#[from] JsonError),

    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),
}
