mod auth_client;
mod session_store;

pub use self::auth_client::{AuthClientTrait, DynAuthClient};
pub use self::session_store::{DynSessionStore, SessionStoreTrait};
