//! Session-related types.
//!
//! Types persisted in local storage for authentication state.

use serde::{Deserialize, Serialize};

/// The identity currently signed in.
///
/// Minimal data kept in storage to identify the shopper. There is no token,
/// expiry or signature: the record lives as long as the storage does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Email the identity registered with (exactly as typed).
    pub email: String,
    /// Display name shown in the account menu.
    pub name: String,
}

impl Session {
    /// Create a session record.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Storage keys for persisted state.
pub mod keys {
    /// Key for the current session record.
    pub const CURRENT_USER: &str = "larq_user";

    /// Key for the array of registered identity records.
    pub const USERS: &str = "larq_users";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_json_shape() {
        let session = Session::new("a@x.com", "Jo");
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(json, r#"{"email":"a@x.com","name":"Jo"}"#);
    }
}
