mod myconfig;
mod redis;

pub use self::myconfig::{Config, SessionBackend};
pub use self::redis::{RedisClient, RedisConfig};
