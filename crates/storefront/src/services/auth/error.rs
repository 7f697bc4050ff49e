//! Authentication error types.

use thiserror::Error;

/// Negative results from the identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No identity matches the email and password pair. Deliberately does not
    /// say which of the two was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An identity with this exact email is already registered.
    #[error("user already exists")]
    UserAlreadyExists,
}
