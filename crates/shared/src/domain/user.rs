use super::role::{normalize_role, role_label};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Profile of the logged-in user.
///
/// Only `role` is interpreted here. Every other field the backend sends is
/// kept in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }

    /// Returns the profile with its role in canonical form.
    pub fn normalized(mut self) -> Self {
        self.role = normalize_role(Some(self.role.as_str()));
        self
    }
}

// Older sessions may carry a non-string role; keep scalars, drop the rest.
fn deserialize_role<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(role_label(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_pass_through() {
        let raw = r#"{"name":"Dr. A","role":"dentista","clinic_id":42,"tags":["x"]}"#;
        let user: UserProfile = serde_json::from_str(raw).unwrap();

        assert_eq!(user.role, "dentista");
        assert_eq!(user.name(), Some("Dr. A"));
        assert_eq!(user.field("clinic_id"), Some(&json!(42)));

        let back: Value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            back,
            json!({"name": "Dr. A", "role": "dentista", "clinic_id": 42, "tags": ["x"]})
        );
    }

    #[test]
    fn missing_or_odd_role_is_tolerated() {
        let user: UserProfile = serde_json::from_str(r#"{"name":"Bea"}"#).unwrap();
        assert_eq!(user.role, "");

        let user: UserProfile = serde_json::from_str(r#"{"role":null}"#).unwrap();
        assert_eq!(user.role, "");

        let user: UserProfile = serde_json::from_str(r#"{"role":3}"#).unwrap();
        assert_eq!(user.role, "3");
    }

    #[test]
    fn normalized_folds_role_and_keeps_fields() {
        let user = UserProfile::new(" Assistente ")
            .with_field("name", "Dr. A")
            .normalized();

        assert_eq!(user.role, "recepcao");
        assert_eq!(user.name(), Some("Dr. A"));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(serde_json::from_str::<UserProfile>("\"admin\"").is_err());
        assert!(serde_json::from_str::<UserProfile>("{not json").is_err());
    }
}
