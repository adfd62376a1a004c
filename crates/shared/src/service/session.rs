use crate::{
    abstract_trait::{DynAuthClient, DynSessionStore},
    cache::{TOKEN_KEY, USER_KEY},
    domain::{Session, UserProfile, normalize_role},
};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Owns the login session: hydrates it from the store once, then keeps the
/// store and the in-memory user in step across login and logout.
///
/// The current user is published through a watch channel so views can react
/// to changes instead of polling.
pub struct SessionManager {
    store: DynSessionStore,
    auth: DynAuthClient,
    current: watch::Sender<Option<UserProfile>>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("store", &"DynSessionStore")
            .field("auth", &"DynAuthClient")
            .field("current", &*self.current.borrow())
            .finish()
    }
}

impl SessionManager {
    pub fn new(store: DynSessionStore, auth: DynAuthClient) -> Self {
        let user = hydrate(&store);
        let (current, _) = watch::channel(user);

        Self {
            store,
            auth,
            current,
        }
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.current.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn token(&self) -> Option<String> {
        if !self.is_authenticated() {
            return None;
        }
        self.store.get(TOKEN_KEY)
    }

    pub fn session(&self) -> Option<Session> {
        let user = self.current_user()?;
        let token = self.store.get(TOKEN_KEY)?;

        Some(Session {
            token,
            user: Some(user),
        })
    }

    /// True when the current user holds any of `roles`. Candidates are
    /// normalized the same way stored roles are.
    pub fn has_role(&self, roles: &[&str]) -> bool {
        let current = self.current.borrow();
        let Some(user) = current.as_ref() else {
            return false;
        };

        if user.role.is_empty() {
            return false;
        }

        roles
            .iter()
            .any(|role| normalize_role(Some(*role)) == user.role)
    }

    /// Persists the session and publishes the user.
    ///
    /// A login without a profile or with a blank token cannot satisfy the
    /// token-and-user pairing, so it leaves the manager anonymous with
    /// nothing stored. The same holds when either slot fails to persist.
    pub fn login(&self, user: Option<UserProfile>, token: &str) {
        let Some(user) = user else {
            warn!("Login without a user profile; clearing persisted session");
            self.reset();
            return;
        };

        if token.trim().is_empty() {
            warn!("Login with an empty token; clearing persisted session");
            self.reset();
            return;
        }

        let user = user.normalized();

        let serialized = match serde_json::to_string(&user) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize user profile: {:?}", e);
                self.reset();
                return;
            }
        };

        if !self.store.set(TOKEN_KEY, token) || !self.store.set(USER_KEY, &serialized) {
            error!("Session was not persisted; staying logged out");
            self.reset();
            return;
        }

        info!("User logged in with role '{}'", user.role);
        self.current.send_replace(Some(user));
    }

    /// Ends the session. The remote invalidation is attempted once when a
    /// token is stored and its outcome is discarded; local state is cleared
    /// only after it settles.
    ///
    /// The token is read before the remote call so no store access happens
    /// while the request is in flight.
    pub async fn logout(&self) {
        match self.store.get(TOKEN_KEY) {
            Some(token) => match self.auth.invalidate_session(&token).await {
                Ok(()) => debug!("Remote session invalidated"),
                Err(e) => warn!("Remote logout failed, clearing local session anyway: {e}"),
            },
            None => debug!("No stored token; skipping remote logout"),
        }

        self.reset();
        info!("User logged out");
    }

    fn reset(&self) {
        self.clear_store();
        self.current.send_replace(None);
    }

    fn clear_store(&self) {
        if !self.store.delete(TOKEN_KEY) {
            warn!("Failed to remove stored session token");
        }
        if !self.store.delete(USER_KEY) {
            warn!("Failed to remove stored session user");
        }
    }
}

fn hydrate(store: &DynSessionStore) -> Option<UserProfile> {
    let (Some(_), Some(raw)) = (store.get(TOKEN_KEY), store.get(USER_KEY)) else {
        debug!("No persisted session");
        return None;
    };

    match serde_json::from_str::<UserProfile>(&raw) {
        Ok(user) => {
            let user = user.normalized();
            info!("Restored session with role '{}'", user.role);
            Some(user)
        }
        Err(e) => {
            warn!("Ignoring malformed persisted user: {:?}", e);
            None
        }
    }
}
