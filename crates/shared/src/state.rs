use crate::{
    abstract_trait::{DynAuthClient, DynSessionStore},
    cache::{FileSessionStore, MemorySessionStore, RedisSessionStore},
    config::{Config, RedisClient, SessionBackend},
    service::{HttpAuthClient, SessionManager},
};
use anyhow::{Context, Result};
use std::{fmt, sync::Arc};
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("session", &self.session)
            .finish()
    }
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let store = build_store(config);

        let auth = HttpAuthClient::new(&config.auth_api_url, config.auth_timeout)
            .context("Failed to build auth client")?;
        let auth: DynAuthClient = Arc::new(auth);

        let session = Arc::new(SessionManager::new(store, auth));

        Ok(Self { session })
    }
}

/// Opens the configured store. An unavailable backend degrades to an
/// in-memory store, which means every start is anonymous.
pub fn build_store(config: &Config) -> DynSessionStore {
    match &config.backend {
        SessionBackend::Memory => {
            info!("Using in-memory session store");
            Arc::new(MemorySessionStore::new())
        }
        SessionBackend::File(path) => match FileSessionStore::open(path) {
            Ok(store) => {
                info!("Using session file {}", store.path().display());
                Arc::new(store)
            }
            Err(e) => {
                warn!(
                    "Session file {} unavailable, sessions will not persist: {:?}",
                    path.display(),
                    e
                );
                Arc::new(MemorySessionStore::new())
            }
        },
        SessionBackend::Redis(redis_config) => {
            let redis = RedisClient::new(redis_config).and_then(|redis| {
                redis.ping()?;
                Ok(redis)
            });

            match redis {
                Ok(redis) => {
                    info!(
                        "Using redis session store at {}:{}",
                        redis_config.host, redis_config.port
                    );
                    Arc::new(RedisSessionStore::new(redis.client, &config.key_prefix))
                }
                Err(e) => {
                    warn!("Redis unavailable, sessions will not persist: {:?}", e);
                    Arc::new(MemorySessionStore::new())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::SessionStoreTrait,
        cache::{TOKEN_KEY, USER_KEY},
        config::RedisConfig,
        domain::UserProfile,
    };
    use std::{path::PathBuf, time::Duration};
    use tempfile::TempDir;

    fn config(backend: SessionBackend) -> Config {
        Config {
            backend,
            key_prefix: "test:session".into(),
            auth_api_url: "http://127.0.0.1:1".into(),
            auth_timeout: Duration::from_secs(1),
            is_dev: true,
            enable_file_log: false,
        }
    }

    #[test]
    fn file_backend_persists_across_states() {
        let dir = TempDir::new().unwrap();
        let config = config(SessionBackend::File(dir.path().join("session.json")));

        let state = AppState::new(&config).unwrap();
        state
            .session
            .login(Some(UserProfile::new("admin").with_field("name", "Ana")), "tok");

        let restarted = AppState::new(&config).unwrap();
        let user = restarted.session.current_user().unwrap();
        assert_eq!(user.role, "admin");
        assert_eq!(user.name(), Some("Ana"));
    }

    #[test]
    fn unusable_file_degrades_to_memory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let store = build_store(&config(SessionBackend::File(blocker.join("session.json"))));

        assert!(store.set(TOKEN_KEY, "tok"));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok"));
        assert_eq!(store.get(USER_KEY), None);
    }

    #[test]
    fn unreachable_redis_degrades_to_memory() {
        let redis = RedisConfig::new("127.0.0.1".into(), 1, 0, None);
        let store = build_store(&config(SessionBackend::Redis(redis)));

        assert!(store.set(TOKEN_KEY, "tok"));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn logout_with_unreachable_server_still_clears() {
        let dir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("session.json");
        let state = AppState::new(&config(SessionBackend::File(path.clone()))).unwrap();
        state.session.login(Some(UserProfile::new("dentista")), "tok");

        state.session.logout().await;

        assert_eq!(state.session.current_user(), None);
        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY), None);
        assert_eq!(reopened.get(USER_KEY), None);
    }
}
