use super::UserProfile;
use serde::{Deserialize, Serialize};

/// An authenticated login: the opaque token plus the profile it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Option<UserProfile>,
}
