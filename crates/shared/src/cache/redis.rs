use crate::{abstract_trait::SessionStoreTrait, errors::StoreError};
use redis::{Commands, Connection};
use std::sync::Arc;
use tracing::{debug, error};

/// Session slots stored as plain Redis strings under `<prefix>:<key>`.
#[derive(Clone)]
pub struct RedisSessionStore {
    pub redis: Arc<redis::Client>,
    prefix: String,
}

impl RedisSessionStore {
    pub fn new(redis: redis::Client, prefix: &str) -> Self {
        Self {
            redis: Arc::new(redis),
            prefix: prefix.trim_end_matches(':').to_string(),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    fn get_conn(&self) -> Result<Connection, StoreError> {
        Ok(self.redis.get_connection()?)
    }

    fn try_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.get_conn()?;
        let value: Option<String> = conn.get(key)?;
        Ok(value)
    }

    fn try_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.get_conn()?;
        let _: () = conn.set(key, value)?;
        Ok(())
    }

    fn try_delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.get_conn()?;
        redis::cmd("DEL").arg(key).query::<()>(&mut conn)?;
        Ok(())
    }
}

impl SessionStoreTrait for RedisSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let key = self.key(key);

        match self.try_get(&key) {
            Ok(Some(data)) => {
                debug!("Session key retrieved: {}", key);
                Some(data)
            }
            Ok(None) => {
                debug!("Session key not found: {}", key);
                None
            }
            Err(e) => {
                error!("Redis get error for session key {}: {:?}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let key = self.key(key);

        match self.try_set(&key, value) {
            Ok(()) => {
                debug!("Session key stored: {}", key);
                true
            }
            Err(e) => {
                error!("Failed to store session key {}: {:?}", key, e);
                false
            }
        }
    }

    fn delete(&self, key: &str) -> bool {
        let key = self.key(key);

        match self.try_delete(&key) {
            Ok(()) => {
                debug!("Session key deleted: {}", key);
                true
            }
            Err(e) => {
                error!("Failed to delete session key {}: {:?}", key, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_store() -> RedisSessionStore {
        let client = redis::Client::open("redis://127.0.0.1:1/").unwrap();
        RedisSessionStore::new(client, "clinic:session:")
    }

    #[test]
    fn keys_are_prefixed() {
        let store = unreachable_store();
        assert_eq!(store.key("token"), "clinic:session:token");
        assert_eq!(store.key("user"), "clinic:session:user");
    }

    #[test]
    fn unreachable_server_is_a_redis_error() {
        let store = unreachable_store();
        assert!(matches!(
            store.try_get("clinic:session:token"),
            Err(StoreError::Redis(_))
        ));
    }

    #[test]
    fn unreachable_server_reads_as_empty() {
        let store = unreachable_store();
        assert_eq!(store.get("token"), None);
        assert!(!store.set("token", "abc"));
        assert!(!store.delete("token"));
    }
}
