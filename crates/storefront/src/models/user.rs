//! Identity domain types.

use serde::{Deserialize, Serialize};

use super::Session;

/// A registered identity as persisted under [`keys::USERS`](super::storage_keys::USERS).
///
/// The password is stored in plain text because the whole identity flow is a
/// local mock. `Debug` redacts it so it never reaches logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Unique key; compared with exact, case-sensitive string equality.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Display name.
    pub name: String,
}

impl IdentityRecord {
    /// Create an identity record.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }

    /// Whether both email and password match exactly.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// The session established when this identity signs in.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(self.email.clone(), self.name.clone())
    }
}

impl std::fmt::Debug for IdentityRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRecord")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}
