//! Local identity store.
//!
//! A stand-in for authentication, good enough to gate checkout and nothing
//! more: credentials are compared in plain text against records persisted in
//! a [`KeyValueStore`].
//!
//! The store accepts any input that is not a duplicate email. Field presence,
//! email shape and the minimum password length are the form layer's job
//! (see [`crate::forms`]).

mod error;

pub use error::AuthError;

use tracing::{info, warn};

use crate::models::{IdentityRecord, Session, storage_keys};
use crate::storage::{KeyValueStore, load_json, save_json};

/// Registered identities plus the current session.
///
/// The session is read from storage once, in [`open`](Self::open), and kept
/// in memory afterwards; the identity collection is re-read on every
/// operation.
#[derive(Debug)]
pub struct IdentityStore<S> {
    storage: S,
    session: Option<Session>,
}

impl<S: KeyValueStore> IdentityStore<S> {
    /// Open the store, restoring any session left in storage.
    ///
    /// A stored session that cannot be parsed is ignored.
    pub fn open(storage: S) -> Self {
        let session = load_json::<Session>(&storage, storage_keys::CURRENT_USER);
        if let Some(session) = &session {
            info!(email = %session.email, "Restored stored session");
        }

        Self { storage, session }
    }

    /// Register a new identity and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the exact email is already
    /// registered. The existing record is left untouched.
    pub fn signup(&mut self, email: &str, password: &str, name: &str) -> Result<Session, AuthError> {
        let mut users = self.load_users();

        if users.iter().any(|user| user.email == email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let record = IdentityRecord::new(email, password, name);
        let session = record.session();
        users.push(record);

        if let Err(e) = save_json(&mut self.storage, storage_keys::USERS, &users) {
            warn!(error = %e, "Failed to persist identity collection");
        }

        info!(email, "Registered new identity");
        self.establish(session.clone());
        Ok(session)
    }

    /// Sign in with an exact email and password match.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no record matches both
    /// fields, whether the email is unknown or the password is wrong.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self
            .load_users()
            .iter()
            .find(|user| user.matches(email, password))
            .map(IdentityRecord::session)
            .ok_or(AuthError::InvalidCredentials)?;

        info!(email, "Signed in");
        self.establish(session.clone());
        Ok(session)
    }

    /// Clear the current session. Registered identities are kept.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(email = %session.email, "Signed out");
        }

        if let Err(e) = self.storage.remove(storage_keys::CURRENT_USER) {
            warn!(error = %e, "Failed to remove stored session");
        }
    }

    /// The identity currently signed in, if any.
    #[must_use]
    pub const fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Borrow the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return its storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Registered identities; unreadable data counts as none.
    fn load_users(&self) -> Vec<IdentityRecord> {
        load_json(&self.storage, storage_keys::USERS).unwrap_or_default()
    }

    fn establish(&mut self, session: Session) {
        if let Err(e) = save_json(&mut self.storage, storage_keys::CURRENT_USER, &session) {
            warn!(error = %e, "Failed to persist session");
        }
        self.session = Some(session);
    }
}
