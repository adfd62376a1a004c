mod auth_client;
mod session;

pub use self::auth_client::HttpAuthClient;
pub use self::session::SessionManager;
