mod role;
mod session;
mod user;

pub use self::role::{ADMIN, DENTISTA, RECEPCAO, normalize_role};
pub use self::session::Session;
pub use self::user::UserProfile;
