//! The transient user record echoed by the user-creation routes.

use serde::{Deserialize, Serialize};

/// Request-scoped user payload.
///
/// Nothing validates or stores it; absent fields decode as empty
/// strings, and the decoded value is echoed straight back to the
/// client.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_default_to_empty() {
        let user: User = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(user, User { name: "Ada".into(), email: String::new() });
    }

    #[test]
    fn wrong_shape_is_an_error() {
        assert!(serde_json::from_str::<User>(r#"{"name":42}"#).is_err());
    }
}
