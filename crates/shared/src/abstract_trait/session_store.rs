use std::sync::Arc;

pub type DynSessionStore = Arc<dyn SessionStoreTrait + Send + Sync>;

/// Durable string slots backing the login session.
///
/// Adapters log their own failures; callers only see a missing value or a
/// `false` write result.
pub trait SessionStoreTrait {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}
