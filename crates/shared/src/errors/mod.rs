mod service;
mod store;

pub use self::service::ServiceError;
pub use self::store::StoreError;
