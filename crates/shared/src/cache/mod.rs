mod file;
mod memory;
mod redis;

pub use self::file::FileSessionStore;
pub use self::memory::MemorySessionStore;
pub use self::redis::RedisSessionStore;

/// Slot holding the opaque auth token.
pub const TOKEN_KEY: &str = "token";
/// Slot holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";
