//! Canonical role identifiers.
//!
//! Roles arrive from the backend and from older persisted sessions with
//! inconsistent spelling. Everything downstream compares against the
//! canonical form produced here.

use serde_json::Value;

pub const RECEPCAO: &str = "recepcao";
pub const DENTISTA: &str = "dentista";
pub const ADMIN: &str = "admin";

/// Labels that are folded into the reception role.
const RECEPCAO_ALIASES: [&str; 2] = ["assistente", "recepção"];

/// Maps a raw role label to its canonical identifier.
///
/// Input is trimmed and lowercased. `None` and blank input yield an empty
/// string. Already-canonical input is returned unchanged.
pub fn normalize_role(raw: Option<&str>) -> String {
    let role = raw.unwrap_or_default().trim().to_lowercase();

    if RECEPCAO_ALIASES.contains(&role.as_str()) {
        return RECEPCAO.to_string();
    }

    role
}

/// Raw role text of a JSON value. Scalars are stringified; null, arrays and
/// objects count as absent.
pub(crate) fn role_label(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}
